use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(world: &mut SimulationCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.stats.step_ms = 0.0;
    }
}

/// Always installs the seeded Xoshiro generator, dropping an injected one
pub(super) fn reseed(world: &mut SimulationCore, seed: u64) {
    world.seed = seed;
    world.rng = crate::core::rng::seeded(seed);
    log::debug!("rng reseeded with {}", seed);
}

pub(super) fn get_perf_stats(world: &SimulationCore) -> PerfStats {
    PerfStats::collect(world)
}
