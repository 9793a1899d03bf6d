//! Execution boundary protocol
//!
//! The kernel is owned by one execution context (a web worker in the
//! browser, a thread natively). Callers talk to it only through ordered
//! [`Command`]s and get back at most one [`Response`] per command.

pub mod boundary;
#[cfg(not(target_arch = "wasm32"))]
pub mod channel;
pub mod messages;

pub use boundary::ExecutionBoundary;
#[cfg(not(target_arch = "wasm32"))]
pub use channel::{spawn_worker, WorkerHandle};
pub use messages::{Command, Response};
