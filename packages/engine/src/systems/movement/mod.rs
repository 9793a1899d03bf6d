//! Movement resolver
//!
//! `propose` turns a material's movement tag into an ordered list of
//! candidate offsets, `attempt_move` walks that list against the live view
//! and performs the first move or density swap that is allowed.
//!
//! y grows downward, so "down" is `dy = 1`.

use smallvec::SmallVec;

use super::context::UpdateContext;
use crate::core::SimRng;
use crate::domain::{Tags, EMPTY};

pub type Offset = (i32, i32);
pub type Candidates = SmallVec<[Offset; 5]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved into an empty cell
    Moved { target: usize },
    /// Traded places with a lighter/heavier occupant
    Swapped { target: usize },
    Blocked,
}

impl MoveOutcome {
    #[inline]
    pub fn is_success(self) -> bool {
        !matches!(self, MoveOutcome::Blocked)
    }
}

/// Randomized (first, second) horizontal order
#[inline]
fn sides<R: SimRng + ?Sized>(rng: &mut R) -> (i32, i32) {
    if rng.gen_bool() {
        (1, -1)
    } else {
        (-1, 1)
    }
}

/// Candidate offsets for a tag set; first matching movement tag wins.
/// `static` and untagged materials get no candidates and consume no draws.
pub fn propose<R: SimRng + ?Sized>(tags: Tags, rng: &mut R) -> Candidates {
    let mut out = Candidates::new();
    if tags.contains(Tags::STATIC) {
        return out;
    }

    if tags.contains(Tags::FLOAT) {
        let (a, b) = sides(rng);
        out.extend_from_slice(&[(0, -1), (a, -1), (b, -1), (a, 0), (b, 0)]);
    } else if tags.contains(Tags::FLOW) {
        let (a, b) = sides(rng);
        out.extend_from_slice(&[(0, 1), (a, 1), (b, 1), (a, 0), (b, 0)]);
    } else if tags.contains(Tags::SAND) {
        let (a, b) = sides(rng);
        out.extend_from_slice(&[(0, 1), (a, 1), (b, 1)]);
    }
    out
}

/// Try each candidate in order against the live view.
///
/// Empty targets are entered. An occupied target is swapped only when the
/// density difference justifies it: moving down into something lighter, or
/// up into something heavier. A `static` occupant is never displaced,
/// whatever its density.
pub fn attempt_move(ctx: &mut UpdateContext, candidates: &[Offset]) -> MoveOutcome {
    let origin = ctx.idx();
    if ctx.grid.is_claimed(origin) {
        return MoveOutcome::Blocked;
    }
    let mover = ctx.id;
    let mover_mat = ctx.material();

    for &(dx, dy) in candidates {
        let Some(target) = ctx.neighbor(dx, dy) else {
            continue;
        };
        let Some(occupant) = ctx.live(target) else {
            continue;
        };

        if occupant == EMPTY {
            ctx.write(target, mover);
            ctx.grid.mark_vacated(origin);
            ctx.stats.moves += 1;
            return MoveOutcome::Moved { target };
        }

        let other = ctx.registry.material(occupant);
        if other.tags.contains(Tags::STATIC) {
            continue;
        }

        let justified = (dy > 0 && mover_mat.density > other.density)
            || (dy < 0 && mover_mat.density < other.density);
        if !justified {
            continue;
        }

        ctx.write(target, mover);
        ctx.write(origin, occupant);
        ctx.stats.swaps += 1;
        return MoveOutcome::Swapped { target };
    }

    MoveOutcome::Blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaterialDefinition, MaterialRegistry};
    use crate::spatial::GridStore;
    use crate::systems::context::TickStats;
    use rand::rngs::mock::StepRng;

    fn registry() -> MaterialRegistry {
        let mut reg = MaterialRegistry::new();
        for def in [
            MaterialDefinition::new("Sand").with_tags(&["sand"]).with_density(1.6),
            MaterialDefinition::new("Water").with_tags(&["flow", "water"]).with_density(1.0),
            MaterialDefinition::new("Stone").with_tags(&["static"]).with_density(2.5),
            MaterialDefinition::new("Fire").with_tags(&["float", "fire"]).with_density(0.1),
            MaterialDefinition::new("Gold").with_tags(&["sand"]).with_density(5.0),
            MaterialDefinition::new("Smoke").with_tags(&["float"]).with_density(0.05),
        ] {
            reg.register(def).unwrap();
        }
        reg
    }

    const SAND: u16 = 1;
    const WATER: u16 = 2;
    const STONE: u16 = 3;
    const FIRE: u16 = 4;
    const GOLD: u16 = 5;
    const SMOKE: u16 = 6;

    fn run(cells: Vec<u16>, w: u32, h: u32, x: u32, y: u32) -> (MoveOutcome, Vec<u16>) {
        let reg = registry();
        let mut grid = GridStore::new(w, h).unwrap();
        grid.replace(cells).unwrap();
        grid.begin_tick();
        let mut rng = StepRng::new(0, 0);
        let mut stats = TickStats::default();
        let mut ctx = UpdateContext::new(&mut grid, &reg, &mut rng, &mut stats, x, y);
        let tags = ctx.tags();
        let candidates = propose(tags, &mut *ctx.rng);
        let outcome = attempt_move(&mut ctx, &candidates);
        (outcome, grid.next.clone())
    }

    #[test]
    fn static_and_untagged_get_no_candidates() {
        let mut rng = StepRng::new(0, 0);
        assert!(propose(Tags::STATIC | Tags::SAND, &mut rng).is_empty());
        assert!(propose(Tags::FLAMMABLE, &mut rng).is_empty());
    }

    #[test]
    fn candidate_orders_follow_the_tag() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(propose(Tags::SAND, &mut rng).as_slice(), &[(0, 1), (-1, 1), (1, 1)]);
        assert_eq!(
            propose(Tags::FLOW, &mut rng).as_slice(),
            &[(0, 1), (-1, 1), (1, 1), (-1, 0), (1, 0)]
        );
        assert_eq!(
            propose(Tags::FLOAT | Tags::FLOW, &mut rng).as_slice(),
            &[(0, -1), (-1, -1), (1, -1), (-1, 0), (1, 0)]
        );
    }

    #[test]
    fn sand_falls_into_empty() {
        let (outcome, next) = run(vec![SAND, 0], 1, 2, 0, 0);
        assert_eq!(outcome, MoveOutcome::Moved { target: 1 });
        assert_eq!(next, vec![0, SAND]);
    }

    #[test]
    fn sand_slides_diagonally_off_stone() {
        // 3x2: sand at (1,0), stone at (1,1)
        let (outcome, next) = run(vec![0, SAND, 0, 0, STONE, 0], 3, 2, 1, 0);
        assert_eq!(outcome, MoveOutcome::Moved { target: 3 });
        assert_eq!(next[3], SAND);
    }

    #[test]
    fn denser_mover_swaps_down_through_lighter() {
        let (outcome, next) = run(vec![SAND, WATER], 1, 2, 0, 0);
        assert_eq!(outcome, MoveOutcome::Swapped { target: 1 });
        assert_eq!(next, vec![WATER, SAND]);
    }

    #[test]
    fn lighter_mover_never_swaps_down() {
        let (outcome, next) = run(vec![WATER, 0, SAND, STONE], 2, 2, 0, 0);
        // blocked below, so the water spreads sideways
        assert_eq!(outcome, MoveOutcome::Moved { target: 1 });
        assert_eq!(next, vec![0, WATER, 0, 0]);
    }

    #[test]
    fn moving_out_vacates_the_origin() {
        let reg = registry();
        let mut grid = GridStore::new(1, 2).unwrap();
        grid.replace(vec![SAND, 0]).unwrap();
        grid.begin_tick();
        let mut rng = StepRng::new(0, 0);
        let mut stats = TickStats::default();
        let mut ctx = UpdateContext::new(&mut grid, &reg, &mut rng, &mut stats, 0, 0);
        attempt_move(&mut ctx, &[(0, 1)]);
        assert!(grid.is_vacated(0));
        assert_eq!(grid.carry_over(), 0);
    }

    #[test]
    fn fire_never_enters_stone_above() {
        let (outcome, next) = run(vec![STONE, FIRE], 1, 2, 0, 1);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert!(next.iter().all(|&v| v == 0));
    }

    #[test]
    fn heavy_sand_never_sinks_through_stone() {
        // 1x2: gold (5.0) over stone (2.5)
        let (outcome, next) = run(vec![GOLD, STONE], 1, 2, 0, 0);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert!(next.iter().all(|&v| v == 0));
    }

    #[test]
    fn smoke_never_rises_through_stone() {
        let (outcome, next) = run(vec![STONE, SMOKE], 1, 2, 0, 1);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert!(next.iter().all(|&v| v == 0));
    }

    #[test]
    fn fire_rises_into_empty() {
        let (outcome, _) = run(vec![0, FIRE], 1, 2, 0, 1);
        assert_eq!(outcome, MoveOutcome::Moved { target: 0 });
    }
}
