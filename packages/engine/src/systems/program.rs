//! Custom program seam
//!
//! Materials defined without tags or reactions may carry an opaque program.
//! The kernel does not interpret it; an [`Interpreter`] supplied by the host
//! evaluates it against a read-only [`NeighborView`] and may answer with one
//! movement intent, applied with the normal movement rules.

use crate::domain::{CustomProgram, MaterialId, MaterialRegistry, EMPTY};
use crate::spatial::GridStore;

use super::movement::Offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Step by one cell; components are clamped to -1..=1
    Move { dx: i32, dy: i32 },
}

impl Intent {
    /// Unit offset for a move intent, `None` for a zero step
    pub fn offset(self) -> Option<Offset> {
        match self {
            Intent::Move { dx, dy } => {
                let step = (dx.clamp(-1, 1), dy.clamp(-1, 1));
                (step != (0, 0)).then_some(step)
            }
        }
    }
}

/// What a program may observe about its cell
pub struct NeighborView<'a> {
    grid: &'a GridStore,
    registry: &'a MaterialRegistry,
    x: u32,
    y: u32,
    id: MaterialId,
}

impl<'a> NeighborView<'a> {
    pub fn new(grid: &'a GridStore, registry: &'a MaterialRegistry, x: u32, y: u32) -> Self {
        let id = grid.get(grid.index(x, y));
        Self {
            grid,
            registry,
            x,
            y,
            id,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn material(&self) -> MaterialId {
        self.id
    }

    /// Material at the offset as of the start of the tick. Out-of-bounds
    /// cells and neighbors lighter than this material read as 0.
    pub fn read_neighbor(&self, dx: i32, dy: i32) -> MaterialId {
        let Some(idx) = self.grid.offset(self.x, self.y, dx, dy) else {
            return EMPTY;
        };
        let other = self.grid.get(idx);
        if self.registry.density(other) < self.registry.density(self.id) {
            EMPTY
        } else {
            other
        }
    }
}

/// Evaluator for opaque material programs
pub trait Interpreter: Send {
    fn evaluate(&mut self, program: &CustomProgram, view: &NeighborView<'_>) -> Option<Intent>;
}

/// Interpreter that never moves anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInterpreter;

impl Interpreter for NullInterpreter {
    fn evaluate(&mut self, _program: &CustomProgram, _view: &NeighborView<'_>) -> Option<Intent> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaterialDefinition;

    fn setup() -> (MaterialRegistry, GridStore) {
        let mut reg = MaterialRegistry::new();
        reg.register(MaterialDefinition::new("Gas").with_density(0.5)).unwrap();
        reg.register(MaterialDefinition::new("Ant").with_density(1.0)).unwrap();
        reg.register(MaterialDefinition::new("Rock").with_density(3.0)).unwrap();
        let mut grid = GridStore::new(3, 1).unwrap();
        grid.replace(vec![1, 2, 3]).unwrap();
        (reg, grid)
    }

    #[test]
    fn lighter_neighbors_read_as_empty() {
        let (reg, grid) = setup();
        let view = NeighborView::new(&grid, &reg, 1, 0);
        assert_eq!(view.material(), 2);
        assert_eq!(view.read_neighbor(-1, 0), EMPTY);
        assert_eq!(view.read_neighbor(1, 0), 3);
    }

    #[test]
    fn out_of_bounds_reads_as_empty() {
        let (reg, grid) = setup();
        let view = NeighborView::new(&grid, &reg, 1, 0);
        assert_eq!(view.read_neighbor(0, -1), EMPTY);
        assert_eq!(view.read_neighbor(5, 0), EMPTY);
    }

    #[test]
    fn intents_are_clamped_to_unit_steps() {
        assert_eq!(Intent::Move { dx: 4, dy: -9 }.offset(), Some((1, -1)));
        assert_eq!(Intent::Move { dx: 0, dy: 0 }.offset(), None);
    }

    #[test]
    fn null_interpreter_never_moves() {
        let (reg, grid) = setup();
        let view = NeighborView::new(&grid, &reg, 0, 0);
        let program = CustomProgram(serde_json::json!({"op": "left"}));
        assert_eq!(NullInterpreter.evaluate(&program, &view), None);
    }
}
