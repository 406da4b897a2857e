//! Character profile module.
//!
//! Characters are long-lived profile entities supplied by the roster
//! collaborator: unmodded base stats, an optimization plan (inline or a
//! named preset), and the five-dot eligibility filter. The priority
//! order is not stored here; the caller passes an ordered slice to the
//! scheduler.

use crate::error::OptimizeError;
use crate::plan::OptimizationPlan;
use crate::stat::StatAxis;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A character's raw stats with no mods equipped.
///
/// Used to convert percent-based stat lines to absolute-equivalent
/// magnitudes. Offense is split between physical and special damage;
/// `phys_dmg_pct` is the share of the character's offense that comes
/// from physical damage.
///
/// # Examples
///
/// ```rust
/// use modopt::{BaseStats, StatAxis};
///
/// let base = BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 1.0, 130.0, 200.0, 100.0);
/// assert_eq!(base.axis_base(StatAxis::Speed), 130.0);
/// // Defense is armor plus resistance.
/// assert_eq!(base.axis_base(StatAxis::Defense), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub health: f64,
    pub protection: f64,
    pub phys_dmg: f64,
    pub spec_dmg: f64,
    /// Share of offense from physical damage, in `[0, 1]`.
    pub phys_dmg_pct: f64,
    pub speed: f64,
    pub armor: f64,
    pub resistance: f64,
}

impl BaseStats {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        health: f64,
        protection: f64,
        phys_dmg: f64,
        spec_dmg: f64,
        phys_dmg_pct: f64,
        speed: f64,
        armor: f64,
        resistance: f64,
    ) -> Self {
        Self {
            health,
            protection,
            phys_dmg,
            spec_dmg,
            phys_dmg_pct,
            speed,
            armor,
            resistance,
        }
    }

    /// The base magnitude a percent line of this axis scales against.
    ///
    /// Offense mixes physical and special damage by `phys_dmg_pct`;
    /// defense is armor plus resistance. Percentage-point axes (crit
    /// chance, potency, ...) never scale and report zero.
    pub fn axis_base(&self, axis: StatAxis) -> f64 {
        match axis {
            StatAxis::Health => self.health,
            StatAxis::Protection => self.protection,
            StatAxis::Speed => self.speed,
            StatAxis::Offense => {
                self.phys_dmg * self.phys_dmg_pct + self.spec_dmg * (1.0 - self.phys_dmg_pct)
            }
            StatAxis::Defense => self.armor + self.resistance,
            _ => 0.0,
        }
    }
}

/// Which plan a character optimizes with: inline values or a named
/// preset stored on the character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanSelection {
    /// Use the plan as given.
    Inline(OptimizationPlan),
    /// Look the plan up in the character's named plans.
    Named(String),
}

/// A character profile.
///
/// Mutated only by plan edits and priority reordering, never destroyed;
/// the roster collaborator owns its lifecycle.
///
/// # Examples
///
/// ```rust
/// use modopt::{BaseStats, Character, OptimizationPlan, PlanMode, StatAxis};
///
/// let base = BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 1.0, 130.0, 200.0, 100.0);
/// let speedy = OptimizationPlan::new(PlanMode::Advanced)
///     .with_weight(StatAxis::Speed, 100.0);
///
/// let character = Character::new("Marauder", base, speedy.clone())
///     .with_named_plan("raids", speedy);
///
/// assert!(character.effective_plan().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique name.
    pub name: String,
    /// Stats with no mods equipped.
    pub base_stats: BaseStats,
    /// The active plan selection.
    pub plan: PlanSelection,
    /// Reusable plan presets, by name.
    pub named_plans: HashMap<String, OptimizationPlan>,
    /// Restrict eligibility to mods with five or more dots.
    pub use_only_5_dot_mods: bool,
}

impl Character {
    /// Create a character with an inline plan.
    pub fn new(name: impl Into<String>, base_stats: BaseStats, plan: OptimizationPlan) -> Self {
        Self {
            name: name.into(),
            base_stats,
            plan: PlanSelection::Inline(plan),
            named_plans: HashMap::new(),
            use_only_5_dot_mods: false,
        }
    }

    /// Store a named plan preset.
    pub fn with_named_plan(mut self, name: impl Into<String>, plan: OptimizationPlan) -> Self {
        self.named_plans.insert(name.into(), plan);
        self
    }

    /// Switch the active selection to a named preset.
    pub fn using_plan(mut self, name: impl Into<String>) -> Self {
        self.plan = PlanSelection::Named(name.into());
        self
    }

    /// Restrict this character to five-dot-or-better mods.
    pub fn with_five_dot_filter(mut self, enabled: bool) -> Self {
        self.use_only_5_dot_mods = enabled;
        self
    }

    /// Resolve the active plan.
    ///
    /// A named selection that is not present in `named_plans` is an
    /// [`OptimizeError::UnknownPlan`]; the scheduler records it and the
    /// run does not proceed for this character.
    pub fn effective_plan(&self) -> Result<&OptimizationPlan, OptimizeError> {
        match &self.plan {
            PlanSelection::Inline(plan) => Ok(plan),
            PlanSelection::Named(name) => {
                self.named_plans
                    .get(name)
                    .ok_or_else(|| OptimizeError::UnknownPlan {
                        character: self.name.clone(),
                        plan: name.clone(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanMode;

    fn base() -> BaseStats {
        BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 0.8, 130.0, 200.0, 100.0)
    }

    #[test]
    fn test_offense_base_mixes_damage_types() {
        // 3000 * 0.8 + 1500 * 0.2 = 2700
        assert!((base().axis_base(StatAxis::Offense) - 2700.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_point_axes_have_no_base() {
        assert_eq!(base().axis_base(StatAxis::Potency), 0.0);
        assert_eq!(base().axis_base(StatAxis::CritChance), 0.0);
    }

    #[test]
    fn test_effective_plan_inline() {
        let plan = OptimizationPlan::new(PlanMode::Basic).with_weight(StatAxis::Speed, 50.0);
        let character = Character::new("A", base(), plan.clone());
        assert_eq!(character.effective_plan().unwrap(), &plan);
    }

    #[test]
    fn test_effective_plan_named() {
        let plan = OptimizationPlan::new(PlanMode::Basic).with_weight(StatAxis::Health, 10.0);
        let character = Character::new("A", base(), OptimizationPlan::default())
            .with_named_plan("tank", plan.clone())
            .using_plan("tank");
        assert_eq!(character.effective_plan().unwrap(), &plan);
    }

    #[test]
    fn test_effective_plan_unknown() {
        let character =
            Character::new("A", base(), OptimizationPlan::default()).using_plan("missing");
        assert_eq!(
            character.effective_plan().unwrap_err(),
            OptimizeError::UnknownPlan {
                character: "A".to_string(),
                plan: "missing".to_string(),
            }
        );
    }
}
