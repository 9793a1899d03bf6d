//! Per-cell update context
//!
//! Wraps the grid, registry and RNG for the cell under the scan cursor and
//! exposes the live view of its neighborhood:
//!
//! - a claimed cell is unavailable (`None`)
//! - a cell whose particle moved out this tick reads as empty
//! - anything else reads its `current` value
//!
//! Resting particles are only copied into `next` after the scan, so a cell
//! the scan already passed stays available to rules until something claims it.

use rand::RngCore;
use serde::Serialize;

use crate::domain::{Material, MaterialId, MaterialRegistry, Tags, EMPTY};
use crate::spatial::GridStore;

/// Counters for one tick
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickStats {
    pub cells_scanned: u32,
    pub non_empty: u32,
    pub moves: u32,
    pub swaps: u32,
    pub reactions: u32,
    pub behaviors: u32,
    pub condensations: u32,
    pub program_moves: u32,
    pub carried: u32,
    pub step_ms: f64,
}

impl TickStats {
    pub fn reset(&mut self) {
        *self = TickStats::default();
    }
}

pub struct UpdateContext<'a> {
    pub grid: &'a mut GridStore,
    pub registry: &'a MaterialRegistry,
    pub rng: &'a mut dyn RngCore,
    pub stats: &'a mut TickStats,
    pub x: u32,
    pub y: u32,
    /// Material under the cursor at the start of the tick
    pub id: MaterialId,
}

impl<'a> UpdateContext<'a> {
    pub fn new(
        grid: &'a mut GridStore,
        registry: &'a MaterialRegistry,
        rng: &'a mut dyn RngCore,
        stats: &'a mut TickStats,
        x: u32,
        y: u32,
    ) -> Self {
        let id = grid.get(grid.index(x, y));
        Self {
            grid,
            registry,
            rng,
            stats,
            x,
            y,
            id,
        }
    }

    #[inline]
    pub fn idx(&self) -> usize {
        self.grid.index(self.x, self.y)
    }

    #[inline]
    pub fn material(&self) -> &'a Material {
        self.registry.material(self.id)
    }

    #[inline]
    pub fn tags(&self) -> Tags {
        self.registry.tags(self.id)
    }

    #[inline]
    pub fn neighbor(&self, dx: i32, dy: i32) -> Option<usize> {
        self.grid.offset(self.x, self.y, dx, dy)
    }

    /// Live value of `idx`, `None` when it is claimed
    #[inline]
    pub fn live(&self, idx: usize) -> Option<MaterialId> {
        if self.grid.is_claimed(idx) {
            None
        } else if self.grid.is_vacated(idx) {
            Some(EMPTY)
        } else {
            Some(self.grid.get(idx))
        }
    }

    /// Claim and write `idx` in the next buffer
    #[inline]
    pub fn write(&mut self, idx: usize, id: MaterialId) -> bool {
        self.grid.claim_write(idx, id)
    }

    #[inline]
    pub fn origin_claimed(&self) -> bool {
        self.grid.is_claimed(self.idx())
    }
}
