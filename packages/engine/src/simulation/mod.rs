//! Simulation core - owns the registry, grid and RNG, and runs ticks
//!
//! The core only orchestrates: per-cell rules live in `systems/`, storage in
//! `spatial/`. Each concern below is a private submodule that operates on
//! the core through `pub(super)` functions.

use crate::core::{KernelResult, KernelRng};
use crate::domain::{MaterialDefinition, MaterialId, MaterialRegistry};
use crate::spatial::GridStore;
use crate::systems::{BehaviorRegistry, Interpreter, TickStats};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/update.rs"]
mod update;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;

pub use config::{KernelConfig, DEFAULT_SEED};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Tick state machine: `Idle -> Stepping -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    Idle,
    Stepping,
}

/// The simulation kernel
pub struct SimulationCore {
    registry: MaterialRegistry,
    grid: GridStore,
    behaviors: BehaviorRegistry,
    interpreter: Box<dyn Interpreter>,
    rng: KernelRng,

    // State
    seed: u64,
    frame: u64,
    state: TickState,

    // Perf metrics
    perf_enabled: bool,
    stats: TickStats,
}

impl SimulationCore {
    /// Kernel seeded from `config.seed`
    pub fn new(config: &KernelConfig) -> KernelResult<Self> {
        init::create_core(config, crate::core::rng::seeded(config.seed))
    }

    /// Kernel drawing from a caller-supplied generator
    pub fn with_rng(config: &KernelConfig, rng: KernelRng) -> KernelResult<Self> {
        init::create_core(config, rng)
    }

    pub fn set_interpreter(&mut self, interpreter: Box<dyn Interpreter>) {
        self.interpreter = interpreter;
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Current value at (x, y), `None` outside the grid
    pub fn cell(&self, x: u32, y: u32) -> Option<MaterialId> {
        self.grid.cell(x, y)
    }

    pub fn particle_count(&self) -> usize {
        self.grid.count_non_empty()
    }

    pub fn register_material(&mut self, def: MaterialDefinition) -> KernelResult<MaterialId> {
        self.registry.register(def)
    }

    /// Install a whole buffer; fails fast on a size mismatch
    pub fn replace_grid(&mut self, buffer: Vec<MaterialId>) -> KernelResult<()> {
        commands::replace_grid(self, buffer)
    }

    /// Overwrite the listed cells; out-of-bounds coordinates are skipped.
    /// Returns how many cells were written.
    pub fn paint_cells(&mut self, material: MaterialId, cells: &[(i32, i32)]) -> KernelResult<usize> {
        commands::paint_cells(self, material, cells)
    }

    /// Overwrite every in-bounds cell within `radius` of (cx, cy)
    pub fn paint_circle(
        &mut self,
        material: MaterialId,
        cx: i32,
        cy: i32,
        radius: i32,
    ) -> KernelResult<usize> {
        commands::paint_circle(self, material, cx, cy, radius)
    }

    pub fn clear(&mut self) {
        commands::clear(self);
    }

    /// Advance one tick
    pub fn step(&mut self) -> KernelResult<()> {
        step::step(self)
    }

    /// Copy of the current buffer
    pub fn snapshot(&self) -> Vec<MaterialId> {
        self.grid.snapshot()
    }

    /// Current buffer handed off by ownership transfer
    pub fn export_grid(&mut self) -> Vec<MaterialId> {
        self.grid.take_export()
    }

    /// Enable or disable step timing (counters are always collected)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Restart from a fresh default generator seeded with `seed`. This
    /// replaces any generator injected through `with_rng`.
    pub fn reseed(&mut self, seed: u64) {
        settings::reseed(self, seed);
    }

    /// Last tick's counters plus grid totals
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Counters of the last completed tick
    pub fn last_tick(&self) -> &TickStats {
        &self.stats
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
