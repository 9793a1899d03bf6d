//! Declarative reactions and top-row condensation
//!
//! Both layers read rules already resolved to ids by the registry, so an
//! unresolved name never reaches this module: the rule is simply absent.

use super::context::UpdateContext;
use super::NEIGHBORS;
use crate::core::SimRng;

/// Top-row phase change. Returns true when the origin was consumed.
pub fn apply_condensation(ctx: &mut UpdateContext) -> bool {
    if ctx.y != 0 {
        return false;
    }
    let Some(rule) = ctx.material().resolved_condense() else {
        return false;
    };
    if !ctx.rng.check_probability(rule.probability) {
        return false;
    }

    let origin = ctx.idx();
    ctx.write(origin, rule.result);
    ctx.stats.condensations += 1;
    true
}

/// First matching rule (by priority) against the first matching orthogonal
/// neighbor fires and consumes the origin.
pub fn apply_declarative(ctx: &mut UpdateContext) -> bool {
    let rules = ctx.material().resolved_reactions();
    if rules.is_empty() {
        return false;
    }
    let origin = ctx.idx();

    for rule in rules {
        for (dx, dy) in NEIGHBORS {
            let Some(n) = ctx.neighbor(dx, dy) else {
                continue;
            };
            if ctx.live(n) != Some(rule.with) {
                continue;
            }
            if !ctx.rng.check_probability(rule.probability) {
                continue;
            }

            ctx.write(origin, rule.result);
            ctx.write(n, rule.byproduct.unwrap_or(rule.with));
            ctx.stats.reactions += 1;
            return true;
        }
    }
    false
}
