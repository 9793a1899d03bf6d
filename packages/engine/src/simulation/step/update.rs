use crate::domain::EMPTY;
use crate::systems::{movement, reactions, Intent, NeighborView, UpdateContext};

use super::SimulationCore;

/// Run the per-cell pipeline for (x, y). Stops at the first stage that
/// moves or consumes the cell; cells left untouched are carried over after
/// the scan.
pub(super) fn update_cell(world: &mut SimulationCore, x: u32, y: u32) {
    let idx = world.grid.index(x, y);
    let id = world.grid.get(idx);
    if id == EMPTY || world.grid.is_claimed(idx) {
        return;
    }
    world.stats.cells_scanned += 1;

    let registry = &world.registry;
    let material = registry.material(id);
    if material.is_inert() {
        return;
    }

    let mut ctx = UpdateContext::new(
        &mut world.grid,
        registry,
        &mut *world.rng,
        &mut world.stats,
        x,
        y,
    );

    if reactions::apply_condensation(&mut ctx) {
        return;
    }
    if reactions::apply_declarative(&mut ctx) {
        return;
    }
    if world.behaviors.update(&mut ctx).consumed {
        return;
    }

    let candidates = movement::propose(material.tags, &mut *ctx.rng);
    if !candidates.is_empty() && movement::attempt_move(&mut ctx, &candidates).is_success() {
        return;
    }

    if let Some(program) = material.program.as_ref() {
        let intent = {
            let view = NeighborView::new(&*ctx.grid, registry, x, y);
            world.interpreter.evaluate(program, &view)
        };
        if let Some(offset) = intent.and_then(Intent::offset) {
            if movement::attempt_move(&mut ctx, &[offset]).is_success() {
                ctx.stats.program_moves += 1;
            }
        }
    }
}
