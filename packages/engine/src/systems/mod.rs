//! Systems - per-cell rules run by the tick driver
//!
//! Order inside one cell update: condensation, declarative reactions,
//! intrinsic tag behaviors, tag movement, custom program.

pub mod behaviors;
pub mod context;
pub mod movement;
pub mod program;
pub mod reactions;

pub use behaviors::{BehaviorOutcome, BehaviorRegistry};
pub use context::{TickStats, UpdateContext};
pub use movement::{MoveOutcome, Offset};
pub use program::{Intent, Interpreter, NeighborView, NullInterpreter};

/// Orthogonal neighbors in scan order: up, down, left, right
pub const NEIGHBORS: [Offset; 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
