//! Behaviors - intrinsic rules keyed on tags
//!
//! Each behavior handles one family of tags. The registry runs them in a
//! fixed order and stops as soon as the origin cell has been written.

mod energy;
mod plant;
mod reactive;

pub use energy::EnergyBehavior;
pub use plant::PlantBehavior;
pub use reactive::ReactiveBehavior;

use super::context::UpdateContext;
use crate::domain::Tags;

/// Behavior trait - each tag family implements this
pub trait Behavior {
    /// Whether any tag in `tags` belongs to this behavior
    fn applies_to(&self, tags: Tags) -> bool;

    /// Run the behavior for the cell under the cursor.
    /// Returns how many rules fired.
    fn update(&self, ctx: &mut UpdateContext) -> u32;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorOutcome {
    /// The origin cell was written (transformed or replaced)
    pub consumed: bool,
    pub fired: u32,
}

/// Behavior registry - dispatch by tag, in pipeline order
pub struct BehaviorRegistry {
    reactive: ReactiveBehavior,
    energy: EnergyBehavior,
    plant: PlantBehavior,
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            reactive: ReactiveBehavior,
            energy: EnergyBehavior,
            plant: PlantBehavior,
        }
    }

    pub fn update(&self, ctx: &mut UpdateContext) -> BehaviorOutcome {
        let tags = ctx.tags();
        let mut outcome = BehaviorOutcome::default();
        let chain: [&dyn Behavior; 3] = [&self.reactive, &self.energy, &self.plant];

        for behavior in chain {
            if !behavior.applies_to(tags) {
                continue;
            }
            outcome.fired += behavior.update(ctx);
            if ctx.origin_claimed() {
                outcome.consumed = true;
                break;
            }
        }

        ctx.stats.behaviors += outcome.fired;
        outcome
    }
}
