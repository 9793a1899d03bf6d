//! Spatial storage: the double-buffered cell grid

pub mod grid;

pub use grid::GridStore;
