//! EnergyBehavior - fire spreading and burning out
//!
//! Fire checks its four neighbors: water may put it out (both cells become
//! steam), flammable neighbors may catch. Anything tagged `burns_out` has a
//! small chance per tick to turn into smoke.

use super::{Behavior, UpdateContext};
use crate::core::SimRng;
use crate::domain::Tags;
use crate::systems::NEIGHBORS;

const EXTINGUISH_CHANCE: f32 = 0.5;
const IGNITE_CHANCE: f32 = 0.35;
const BURN_OUT_CHANCE: f32 = 0.03;

pub struct EnergyBehavior;

impl EnergyBehavior {
    /// Returns how many neighbors caught or doused the fire
    #[inline]
    fn update_fire(&self, ctx: &mut UpdateContext) -> u32 {
        let known = ctx.registry.well_known();
        let vapor = known.steam.or(known.smoke);
        let fire = ctx.id;
        let origin = ctx.idx();
        let mut fired = 0;

        for (dx, dy) in NEIGHBORS {
            let Some(n) = ctx.neighbor(dx, dy) else {
                continue;
            };
            let Some(id) = ctx.live(n) else {
                continue;
            };
            let tags = ctx.registry.tags(id);

            if tags.contains(Tags::WATER) {
                let Some(vapor) = vapor else {
                    continue;
                };
                if ctx.rng.check_probability(EXTINGUISH_CHANCE) {
                    ctx.write(origin, vapor);
                    ctx.write(n, vapor);
                    return fired + 1;
                }
            } else if tags.contains(Tags::FLAMMABLE) && ctx.rng.check_probability(IGNITE_CHANCE) {
                ctx.write(n, fire);
                fired += 1;
            }
        }
        fired
    }

    #[inline]
    fn update_burn_out(&self, ctx: &mut UpdateContext) -> u32 {
        let Some(smoke) = ctx.registry.well_known().smoke else {
            return 0;
        };
        if !ctx.rng.check_probability(BURN_OUT_CHANCE) {
            return 0;
        }
        let origin = ctx.idx();
        ctx.write(origin, smoke);
        1
    }
}

impl Behavior for EnergyBehavior {
    fn applies_to(&self, tags: Tags) -> bool {
        tags.intersects(Tags::FIRE | Tags::BURNS_OUT)
    }

    fn update(&self, ctx: &mut UpdateContext) -> u32 {
        let tags = ctx.tags();
        let mut fired = 0;
        if tags.contains(Tags::FIRE) {
            fired += self.update_fire(ctx);
            if ctx.origin_claimed() {
                return fired;
            }
        }
        if tags.contains(Tags::BURNS_OUT) {
            fired += self.update_burn_out(ctx);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn fire_ignites_every_flammable_neighbor() {
        let reg = registry();
        let mut rng = StepRng::new(0, 0);
        let cells = vec![0, WOOD, 0, WOOD, FIRE, WOOD, 0, WOOD, 0];
        let (fired, grid) = run(&reg, cells, 3, (1, 1), &mut rng, |ctx| EnergyBehavior.update_fire(ctx));
        assert_eq!(fired, 4);
        assert_eq!(grid.next, vec![0, FIRE, 0, FIRE, 0, FIRE, 0, FIRE, 0]);
        // spreading does not consume the fire itself
        assert!(!grid.is_claimed(4));
    }

    #[test]
    fn water_puts_fire_out_and_stops_the_scan() {
        let reg = registry();
        let mut rng = StepRng::new(0, 0);
        // up is water, down is wood
        let cells = vec![WATER, FIRE, WOOD];
        let (_, grid) = run(&reg, cells, 1, (0, 1), &mut rng, |ctx| EnergyBehavior.update(ctx));
        assert_eq!(grid.next, vec![STEAM, STEAM, 0]);
        assert!(!grid.is_claimed(2));
    }

    #[test]
    fn burns_out_into_smoke() {
        let reg = registry();
        let mut rng = StepRng::new(0, 0);
        let (fired, grid) = run(&reg, vec![FIRE, 0, 0, 0], 2, (0, 0), &mut rng, |ctx| {
            EnergyBehavior.update(ctx)
        });
        assert_eq!(fired, 1);
        assert_eq!(grid.next[0], SMOKE);
    }

    #[test]
    fn unlucky_draws_leave_fire_burning() {
        let reg = registry();
        let mut rng = StepRng::new(u64::MAX, 0);
        let (fired, grid) = run(&reg, vec![FIRE, WOOD], 2, (0, 0), &mut rng, |ctx| {
            EnergyBehavior.update(ctx)
        });
        assert_eq!(fired, 0);
        assert_eq!(grid.claimed_count(), 0);
    }
}
