use crate::core::{KernelError, KernelResult};
use crate::domain::MaterialId;

use super::SimulationCore;

pub(super) fn replace_grid(world: &mut SimulationCore, buffer: Vec<MaterialId>) -> KernelResult<()> {
    world.grid.replace(buffer).map_err(|err| {
        log::warn!("replace_grid rejected: {}", err);
        err
    })
}

fn check_material(world: &SimulationCore, material: MaterialId) -> KernelResult<()> {
    if world.registry.is_valid_id(material) {
        Ok(())
    } else {
        Err(KernelError::UnknownMaterial(material))
    }
}

#[inline]
fn paint_one(world: &mut SimulationCore, x: i32, y: i32, material: MaterialId) -> bool {
    if !world.grid.in_bounds(x, y) {
        return false;
    }
    let idx = world.grid.index(x as u32, y as u32);
    world.grid.set_current(idx, material);
    true
}

pub(super) fn paint_cells(
    world: &mut SimulationCore,
    material: MaterialId,
    cells: &[(i32, i32)],
) -> KernelResult<usize> {
    check_material(world, material)?;
    let mut painted = 0;
    for &(x, y) in cells {
        if paint_one(world, x, y, material) {
            painted += 1;
        }
    }
    Ok(painted)
}

pub(super) fn paint_circle(
    world: &mut SimulationCore,
    material: MaterialId,
    cx: i32,
    cy: i32,
    radius: i32,
) -> KernelResult<usize> {
    check_material(world, material)?;
    let width = i64::from(world.grid.width());
    let height = i64::from(world.grid.height());
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let radius = i64::from(radius.max(0));
    let r2 = radius * radius;

    // Only the part of the bounding box that overlaps the grid is visited
    let (x0, x1) = ((cx - radius).max(0), (cx + radius).min(width - 1));
    let (y0, y1) = ((cy - radius).max(0), (cy + radius).min(height - 1));

    let mut painted = 0;
    for y in y0..=y1 {
        let dy = y - cy;
        for x in x0..=x1 {
            let dx = x - cx;
            if (dx * dx).saturating_add(dy * dy) <= r2 {
                let idx = world.grid.index(x as u32, y as u32);
                world.grid.set_current(idx, material);
                painted += 1;
            }
        }
    }
    Ok(painted)
}

pub(super) fn clear(world: &mut SimulationCore) {
    world.grid.clear();
}
