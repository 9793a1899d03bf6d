//! Core utilities shared by every layer of the kernel
//!
//! - utils/  - zero-cost indexing macros (must be first for macro export!)
//! - error   - the kernel error taxonomy
//! - rng     - injected random source

#[macro_use]
pub mod utils;
pub mod error;
pub mod rng;

pub use error::{KernelError, KernelResult};
pub use rng::{KernelRng, SimRng};
