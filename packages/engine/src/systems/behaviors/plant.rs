//! PlantBehavior - seeds germinating in mud and plants growing upward

use super::{Behavior, UpdateContext};
use crate::core::SimRng;
use crate::domain::{Tags, EMPTY};
use crate::systems::NEIGHBORS;

const GROW_CHANCE: f32 = 0.06;

pub struct PlantBehavior;

impl PlantBehavior {
    /// Seed touching mud: seed becomes plant, mud dries to dirt.
    /// Either half is skipped when its material is not registered.
    #[inline]
    fn process_seed(&self, ctx: &mut UpdateContext) -> u32 {
        let known = ctx.registry.well_known();
        let origin = ctx.idx();

        for (dx, dy) in NEIGHBORS {
            let Some(n) = ctx.neighbor(dx, dy) else {
                continue;
            };
            let Some(id) = ctx.live(n) else {
                continue;
            };
            if !ctx.registry.tags(id).contains(Tags::MUD) {
                continue;
            }

            if let Some(plant) = known.plant {
                ctx.write(origin, plant);
            }
            if let Some(dirt) = known.dirt {
                ctx.write(n, dirt);
            }
            return 1;
        }
        0
    }

    /// Copy the plant into the empty cell directly above
    #[inline]
    fn process_growth(&self, ctx: &mut UpdateContext) -> u32 {
        let Some(above) = ctx.neighbor(0, -1) else {
            return 0;
        };
        if ctx.live(above) != Some(EMPTY) {
            return 0;
        }
        if !ctx.rng.check_probability(GROW_CHANCE) {
            return 0;
        }
        let id = ctx.id;
        ctx.write(above, id);
        1
    }
}

impl Behavior for PlantBehavior {
    fn applies_to(&self, tags: Tags) -> bool {
        tags.contains(Tags::SEED) || tags.contains(Tags::PLANT | Tags::GROW)
    }

    fn update(&self, ctx: &mut UpdateContext) -> u32 {
        let tags = ctx.tags();
        let mut fired = 0;
        if tags.contains(Tags::SEED) {
            fired += self.process_seed(ctx);
            if ctx.origin_claimed() {
                return fired;
            }
        }
        if tags.contains(Tags::PLANT | Tags::GROW) {
            fired += self.process_growth(ctx);
        }
        fired
    }
}
