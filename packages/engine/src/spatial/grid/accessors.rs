use super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl GridStore {
    // === Current buffer ===
    #[inline]
    pub fn get(&self, idx: usize) -> MaterialId {
        *fast!(self.current, [idx])
    }

    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> Option<MaterialId> {
        if x < self.width && y < self.height {
            Some(self.get(self.index(x, y)))
        } else {
            None
        }
    }

    /// Direct write into `current`, used between ticks by paint commands
    #[inline]
    pub fn set_current(&mut self, idx: usize, id: MaterialId) {
        fast!(self.current, [idx] = id);
    }

    // === Reacted mask ===
    #[inline]
    pub fn is_claimed(&self, idx: usize) -> bool {
        *fast!(self.reacted, [idx]) & CLAIMED != 0
    }

    #[inline]
    pub fn is_vacated(&self, idx: usize) -> bool {
        *fast!(self.reacted, [idx]) & VACATED != 0
    }

    /// Claim `idx` and write `id` into `next`.
    /// Returns `false` without writing when the cell is already claimed.
    #[inline]
    pub fn claim_write(&mut self, idx: usize, id: MaterialId) -> bool {
        if self.is_claimed(idx) {
            return false;
        }
        fast!(self.reacted, [idx] = CLAIMED);
        fast!(self.next, [idx] = id);
        true
    }

    /// Record that the particle at `idx` moved out and left nothing behind
    #[inline]
    pub fn mark_vacated(&mut self, idx: usize) {
        debug_assert!(!self.is_claimed(idx), "mark_vacated on claimed cell {}", idx);
        fast!(self.reacted, [idx] = VACATED);
    }

    #[inline]
    pub fn next_value(&self, idx: usize) -> MaterialId {
        *fast!(self.next, [idx])
    }

    pub fn claimed_count(&self) -> usize {
        self.reacted.iter().filter(|&&m| m & CLAIMED != 0).count()
    }

    // === Tick lifecycle ===

    /// Zero `next` and the mask. A `next` handed out by `take_export` is
    /// replaced with a fresh allocation here.
    pub fn begin_tick(&mut self) {
        if self.next.len() != self.size {
            self.next = vec![EMPTY; self.size];
        } else {
            #[cfg(feature = "parallel")]
            {
                self.next.par_iter_mut().for_each(|v| *v = EMPTY);
            }
            #[cfg(not(feature = "parallel"))]
            {
                self.next.fill(EMPTY);
            }
        }

        #[cfg(feature = "parallel")]
        {
            self.reacted.par_iter_mut().for_each(|v| *v = 0);
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.reacted.fill(0);
        }
    }

    /// Copy every particle that neither moved, reacted nor was overwritten
    /// into `next`. Returns how many cells were carried.
    pub fn carry_over(&mut self) -> u32 {
        let mut carried = 0;
        for idx in 0..self.size {
            let id = *fast!(self.current, [idx]);
            if id != EMPTY && *fast!(self.reacted, [idx]) == 0 {
                fast!(self.next, [idx] = id);
                fast!(self.reacted, [idx] = CLAIMED);
                carried += 1;
            }
        }
        carried
    }

    /// Publish `next` as the new `current`
    #[inline]
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn count_non_empty(&self) -> usize {
        self.current.iter().filter(|&&id| id != EMPTY).count()
    }
}
