use crate::core::{KernelResult, KernelRng};
use crate::domain::MaterialRegistry;
use crate::spatial::GridStore;
use crate::systems::{BehaviorRegistry, NullInterpreter, TickStats};

use super::{KernelConfig, SimulationCore, TickState};

pub(super) fn create_core(config: &KernelConfig, rng: KernelRng) -> KernelResult<SimulationCore> {
    let grid = GridStore::new(config.width, config.height)?;
    log::info!(
        "kernel created: {}x{} grid, seed {}",
        config.width,
        config.height,
        config.seed
    );

    Ok(SimulationCore {
        registry: MaterialRegistry::new(),
        grid,
        behaviors: BehaviorRegistry::new(),
        interpreter: Box::new(NullInterpreter),
        rng,
        seed: config.seed,
        frame: 0,
        state: TickState::Idle,
        perf_enabled: config.perf_enabled,
        stats: TickStats::default(),
    })
}
