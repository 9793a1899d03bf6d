//! Random source seam for the tick pipeline
//!
//! Every probabilistic branch in the kernel draws through [`SimRng`], so a
//! caller can pin the whole simulation to a seed (or to a constant stream in
//! tests) by choosing what the kernel owns as its [`KernelRng`].

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Random draws used by movement and reaction rules
pub trait SimRng {
    /// Fair coin
    fn gen_bool(&mut self) -> bool;

    /// Uniform f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// True when a draw lands below `probability`.
    /// A probability of 0 never passes, 1 always does.
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::gen(self)
    }
}

/// The generator owned by a running kernel
pub type KernelRng = Box<dyn RngCore + Send>;

/// Default production generator for a seed
pub fn seeded(seed: u64) -> KernelRng {
    Box::new(Xoshiro256StarStar::seed_from_u64(seed))
}
