//! Public API for the JS worker

pub mod wasm;
