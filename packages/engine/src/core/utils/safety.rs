//! Zero-cost indexing for the grid hot path
//!
//! Every access goes through `get_unchecked`, guarded by a `debug_assert!`
//! on the buffer length. That is sound only because each index handed to
//! the grid accessors comes from `GridStore::index` or a bounds-checked
//! neighbor lookup, and the three buffers always share one length.
//!
//! ```rust
//! use sandbox_kernel::fast;
//!
//! let cells: Vec<u16> = vec![0, 3, 7, 0];
//! assert_eq!(*fast!(cells, [2]), 7);
//!
//! let mut mask = vec![0u8; 4];
//! fast!(mask, [1] = 1);
//! assert_eq!(mask, [0, 1, 0, 0]);
//! ```

/// Indexed read (`fast!(cells, [i])`, yields `&T`) or write
/// (`fast!(cells, [i] = v)`) on a grid buffer.
///
/// The index is range-checked with `debug_assert!`, so tests catch a stray
/// index with the buffer length in the message. The value of a write is
/// evaluated before the buffer is borrowed.
#[macro_export]
macro_rules! fast {
    ($cells:expr, [$index:expr]) => {{
        let index: usize = $index;
        let cells = &$cells;
        debug_assert!(index < cells.len(), "cell {} outside buffer of {}", index, cells.len());
        // SAFETY: grid indices are produced in range (see module docs)
        unsafe { cells.get_unchecked(index) }
    }};

    ($cells:expr, [$index:expr] = $value:expr) => {{
        let value = $value;
        let index: usize = $index;
        let cells = &mut $cells;
        debug_assert!(index < cells.len(), "cell {} outside buffer of {}", index, cells.len());
        // SAFETY: as above
        unsafe { *cells.get_unchecked_mut(index) = value }
    }};
}
