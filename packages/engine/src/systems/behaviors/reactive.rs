//! ReactiveBehavior - alkali metals meeting water
//!
//! Both cells flash to steam. Explosive variants also scatter smoke over the
//! unclaimed part of their 3x3 neighborhood.

use super::{Behavior, UpdateContext};
use crate::core::SimRng;
use crate::domain::Tags;
use crate::systems::NEIGHBORS;

const BLAST_CHANCE: f32 = 0.6;

pub struct ReactiveBehavior;

impl ReactiveBehavior {
    fn detonate(&self, ctx: &mut UpdateContext) -> u32 {
        let known = ctx.registry.well_known();
        let Some(debris) = known.smoke.or(known.steam) else {
            return 0;
        };

        let mut hit = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(idx) = ctx.neighbor(dx, dy) else {
                    continue;
                };
                if ctx.grid.is_claimed(idx) {
                    continue;
                }
                if ctx.rng.check_probability(BLAST_CHANCE) {
                    ctx.write(idx, debris);
                    hit += 1;
                }
            }
        }
        hit
    }
}

impl Behavior for ReactiveBehavior {
    fn applies_to(&self, tags: Tags) -> bool {
        tags.contains(Tags::REACTIVE_WATER)
    }

    fn update(&self, ctx: &mut UpdateContext) -> u32 {
        let known = ctx.registry.well_known();
        let Some(vapor) = known.steam.or(known.smoke) else {
            return 0;
        };
        let origin = ctx.idx();

        for (dx, dy) in NEIGHBORS {
            let Some(n) = ctx.neighbor(dx, dy) else {
                continue;
            };
            let Some(id) = ctx.live(n) else {
                continue;
            };
            if !ctx.registry.tags(id).contains(Tags::WATER) {
                continue;
            }

            ctx.write(origin, vapor);
            ctx.write(n, vapor);
            if ctx.tags().contains(Tags::EXPLOSIVE) {
                self.detonate(ctx);
            }
            return 1;
        }
        0
    }
}
