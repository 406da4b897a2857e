//! Value function module.
//!
//! Pure scoring of stat contributions against an optimization plan.
//! These functions are deterministic, allocation-free, and carry no
//! external state; the search engine calls them in its inner loop.
//!
//! The scoring rule is the one the presentation layer documents to
//! users: each stat line is worth `weight x magnitude`, where percent
//! lines are first converted to flat equivalents via the character's
//! base stats. A speed weight of 100 makes a "+6 speed" line worth 600;
//! a 10% speed set bonus on a base speed of 130 is worth
//! `100 x 130 x 0.1 = 1300`.

use crate::character::BaseStats;
use crate::gamedata::GameData;
use crate::item::{Mod, SetType};
use crate::plan::OptimizationPlan;
use crate::stat::{Stat, StatSet};

/// Convert one stat line to its flat-equivalent magnitude.
///
/// Lines that scale with base stats (e.g. a percent health bonus) are
/// multiplied by the character's base value for the axis; all other
/// lines pass through unchanged.
pub fn flat_magnitude(line: Stat, base: &BaseStats) -> f64 {
    if line.stat.scales_with_base() {
        base.axis_base(line.stat.axis()) * line.value / 100.0
    } else {
        line.value
    }
}

/// Score a stat contribution against a plan.
///
/// Sums `effective_weight(axis) x flat magnitude` over every non-zero
/// line in the set. Basic-mode weights pick up their per-axis
/// normalization factor from `data`.
///
/// # Examples
///
/// ```rust
/// use modopt::value::score_stat_set;
/// use modopt::{BaseStats, GameData, OptimizationPlan, PlanMode};
/// use modopt::{StatAxis, StatSet, StatType};
///
/// let data = GameData::new([1.0; StatAxis::COUNT], vec![]).unwrap();
/// let base = BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 1.0, 130.0, 200.0, 100.0);
/// let plan = OptimizationPlan::new(PlanMode::Advanced)
///     .with_weight(StatAxis::Speed, 100.0);
///
/// let mut contribution = StatSet::new();
/// contribution.add(StatType::Speed, 6.0);
/// assert_eq!(score_stat_set(&contribution, &base, &plan, &data), 600.0);
/// ```
pub fn score_stat_set(
    contribution: &StatSet,
    base: &BaseStats,
    plan: &OptimizationPlan,
    data: &GameData,
) -> f64 {
    let mut total = 0.0;
    for (stat, value) in contribution.iter() {
        let flat = flat_magnitude(Stat::new(stat, value), base);
        total += flat * plan.effective_weight(stat.axis(), data);
    }
    total
}

/// Score a single mod's own contribution (no set bonuses).
///
/// This is the marginal value used for per-slot candidate pruning.
pub fn score_mod(m: &Mod, base: &BaseStats, plan: &OptimizationPlan, data: &GameData) -> f64 {
    score_stat_set(&m.contribution(), base, plan, data)
}

/// Count completed sets and sum the full contribution of a candidate
/// assignment, set bonuses included.
///
/// Each set bonus is added once per completed threshold: four mods of a
/// two-mod set grant the bonus twice.
pub fn score_assignment(
    mods: &[&Mod],
    base: &BaseStats,
    plan: &OptimizationPlan,
    data: &GameData,
) -> f64 {
    let mut total = StatSet::new();
    let mut set_counts = [0u8; SetType::COUNT];
    for m in mods {
        total.merge(&m.contribution());
        set_counts[m.set_type.index()] += 1;
    }
    for bonus in data.set_bonuses() {
        let completed = set_counts[bonus.set_type.index()] / bonus.required;
        for _ in 0..completed {
            total.add_stat(bonus.bonus);
        }
    }
    score_stat_set(&total, base, plan, data)
}
