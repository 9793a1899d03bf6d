use crate::core::KernelResult;

use super::update;
use super::{PerfTimer, SimulationCore, TickState};

/// One tick: validate, scan bottom-up, carry resting cells, swap.
///
/// Validation runs before anything is touched, so an out-of-range id aborts
/// the tick with the grid exactly as it was. `&mut` access rules out a
/// second tick while one runs; callers that issue steps back to back go
/// through the boundary queue.
pub(super) fn step(world: &mut SimulationCore) -> KernelResult<()> {
    if let Err(err) = world.registry.validate_cells(&world.grid.current) {
        log::warn!("tick {} aborted: {}", world.frame, err);
        return Err(err);
    }

    world.state = TickState::Stepping;
    let timer = world.perf_enabled.then(PerfTimer::start);
    world.stats.reset();
    world.grid.begin_tick();

    let width = world.grid.width();
    let height = world.grid.height();
    for y in (0..height).rev() {
        for x in 0..width {
            update::update_cell(world, x, y);
        }
    }

    world.stats.carried = world.grid.carry_over();
    world.grid.swap_buffers();
    world.frame += 1;
    world.stats.non_empty = world.grid.count_non_empty() as u32;
    if let Some(timer) = timer {
        world.stats.step_ms = timer.elapsed_ms();
    }
    world.state = TickState::Idle;

    log::trace!(
        "tick {}: {} moves, {} swaps, {} reactions, {} behaviors",
        world.frame,
        world.stats.moves,
        world.stats.swaps,
        world.stats.reactions,
        world.stats.behaviors
    );
    Ok(())
}
