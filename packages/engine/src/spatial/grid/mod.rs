//! Grid store - two flat buffers of material ids plus a claim mask
//!
//! `current` is the state visible to rules during a tick, `next` is the
//! state being built. Every write into `next` goes through a claim on the
//! per-cell `reacted` mask, and a claimed cell is never written again before
//! the swap. The mask also remembers cells whose particle moved away, so the
//! rest of the scan reads them as empty.
//!
//! Layout is row-major: `idx = y * width + x`, `y = 0` is the top row.

use crate::core::{KernelError, KernelResult};
use crate::domain::{MaterialId, EMPTY};

/// `reacted` bit: written into `next` this tick
pub const CLAIMED: u8 = 1 << 0;
/// `reacted` bit: the particle that lived here moved out this tick
pub const VACATED: u8 = 1 << 1;

mod accessors;
mod indexing;
mod transfer;

pub struct GridStore {
    width: u32,
    height: u32,
    size: usize,

    pub current: Vec<MaterialId>,
    pub next: Vec<MaterialId>,
    pub reacted: Vec<u8>,
}

impl GridStore {
    pub fn new(width: u32, height: u32) -> KernelResult<Self> {
        let size = (width as usize)
            .checked_mul(height as usize)
            .filter(|&s| s > 0 && s <= i32::MAX as usize)
            .ok_or(KernelError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            size,
            current: vec![EMPTY; size],
            next: vec![EMPTY; size],
            reacted: vec![0; size],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridStore {
        GridStore::new(3, 2).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            GridStore::new(0, 4),
            Err(KernelError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn indexing_is_row_major() {
        let g = grid();
        assert_eq!(g.size(), 6);
        assert_eq!(g.index(2, 1), 5);
        assert_eq!(g.coords(4), (1, 1));
        assert_eq!(g.offset(0, 0, -1, 0), None);
        assert_eq!(g.offset(0, 0, 1, 1), Some(4));
        assert_eq!(g.offset(2, 1, 0, 1), None);
    }

    #[test]
    fn claims_are_set_once() {
        let mut g = grid();
        g.begin_tick();
        assert!(g.claim_write(1, 7));
        assert!(!g.claim_write(1, 9));
        assert_eq!(g.next[1], 7);
        assert!(g.is_claimed(1));
        assert_eq!(g.claimed_count(), 1);
    }

    #[test]
    fn vacated_cells_are_not_claimed() {
        let mut g = grid();
        g.begin_tick();
        g.mark_vacated(2);
        assert!(g.is_vacated(2));
        assert!(!g.is_claimed(2));
        assert!(g.claim_write(2, 4));
        assert!(!g.is_vacated(2));
    }

    #[test]
    fn carry_over_copies_only_resting_cells() {
        let mut g = grid();
        g.current = vec![1, 2, 3, 0, 0, 0];
        g.begin_tick();
        g.claim_write(0, 5);
        g.mark_vacated(1);
        assert_eq!(g.carry_over(), 1);
        assert_eq!(g.next, vec![5, 0, 3, 0, 0, 0]);
        assert!(g.is_claimed(2));
    }

    #[test]
    fn begin_tick_zeroes_next_and_mask() {
        let mut g = grid();
        g.begin_tick();
        g.claim_write(0, 3);
        g.mark_vacated(1);
        g.begin_tick();
        assert!(g.next.iter().all(|&v| v == EMPTY));
        assert_eq!(g.claimed_count(), 0);
        assert!(!g.is_vacated(1));
    }

    #[test]
    fn swap_publishes_next() {
        let mut g = grid();
        g.current[0] = 2;
        g.begin_tick();
        g.claim_write(3, 2);
        g.swap_buffers();
        assert_eq!(g.current, vec![0, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn replace_checks_size_only() {
        let mut g = grid();
        assert_eq!(
            g.replace(vec![1, 2]),
            Err(KernelError::SizeMismatch { expected: 6, actual: 2 })
        );
        g.replace(vec![1, 0, 4, 0, 0, 9]).unwrap();
        assert_eq!(g.snapshot(), vec![1, 0, 4, 0, 0, 9]);
    }

    #[test]
    fn taken_buffer_is_reallocated_before_next_tick() {
        let mut g = grid();
        g.current[2] = 5;
        let out = g.take_export();
        assert_eq!(out, vec![0, 0, 5, 0, 0, 0]);
        assert!(g.next.is_empty());
        g.begin_tick();
        assert_eq!(g.next.len(), 6);
        assert_eq!(g.get(2), 5);
    }

    #[test]
    fn count_non_empty_skips_zero() {
        let mut g = grid();
        g.current[0] = 1;
        g.current[5] = 3;
        assert_eq!(g.count_non_empty(), 2);
        g.clear();
        assert_eq!(g.count_non_empty(), 0);
    }
}
