use serde::Serialize;

use crate::domain::MaterialId;
use crate::systems::TickStats;

use super::SimulationCore;

/// Snapshot returned by `get_stats`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfStats {
    pub frame: u64,
    pub perf_enabled: bool,
    #[serde(flatten)]
    pub last_tick: TickStats,
    pub particle_count: u32,
    pub grid_size: u32,
    pub material_count: u32,
    /// Bytes held by the two id buffers and the mask
    pub memory_bytes: u32,
}

impl PerfStats {
    pub(super) fn collect(world: &SimulationCore) -> Self {
        let size = world.grid.size();
        let id_bytes = std::mem::size_of::<MaterialId>();
        let memory = size * (2 * id_bytes + 1);

        PerfStats {
            frame: world.frame,
            perf_enabled: world.perf_enabled,
            last_tick: world.stats.clone(),
            particle_count: world.grid.count_non_empty() as u32,
            grid_size: size as u32,
            material_count: world.registry.len() as u32,
            memory_bytes: memory.min(u32::MAX as usize) as u32,
        }
    }
}
