//! Sandbox Kernel - falling-sand material simulation for a web worker
//!
//! Architecture:
//! - core/        - Macros, errors, RNG seam
//! - domain/      - Materials, tags, registry
//! - spatial/     - Double-buffered grid store
//! - systems/     - Movement, reactions, tag behaviors, program seam
//! - simulation/  - Tick driver and commands
//! - protocol/    - Command/response boundary
//! - api/         - wasm-bindgen facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;
pub mod protocol;
pub mod api;

use wasm_bindgen::prelude::*;

pub use api::wasm::KernelWorker;
pub use core::{KernelError, KernelResult};
pub use domain::{MaterialDefinition, MaterialId, MaterialRegistry, ReactionRule, Tags, EMPTY};
pub use protocol::{Command, ExecutionBoundary, Response};
pub use simulation::{KernelConfig, SimulationCore};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize panic reporting and console logging for the worker
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    log::info!("sandbox kernel {} initialized", version());
}

/// Get kernel version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
