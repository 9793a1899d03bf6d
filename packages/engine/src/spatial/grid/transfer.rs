//! Whole-buffer exchange with the caller

use super::*;

impl GridStore {
    /// Install a caller-supplied buffer as `current`. Only the size is checked
    /// here; material ids are validated when the next tick starts.
    pub fn replace(&mut self, buffer: Vec<MaterialId>) -> KernelResult<()> {
        if buffer.len() != self.size {
            return Err(KernelError::SizeMismatch {
                expected: self.size,
                actual: buffer.len(),
            });
        }
        self.current = buffer;
        Ok(())
    }

    /// Copy of `current`
    pub fn snapshot(&self) -> Vec<MaterialId> {
        self.current.clone()
    }

    /// Copy of `current` written into the idle `next` allocation, whose
    /// ownership moves to the caller. `begin_tick` allocates a replacement.
    pub fn take_export(&mut self) -> Vec<MaterialId> {
        let mut out = std::mem::take(&mut self.next);
        if out.len() == self.size {
            out.copy_from_slice(&self.current);
            out
        } else {
            self.current.clone()
        }
    }

    pub fn clear(&mut self) {
        self.current.fill(EMPTY);
    }
}
