//! Game-data constants module.
//!
//! The basic-mode normalization factors and the set-bonus table are
//! game-data constants owned by the roster/inventory collaborator, not
//! by this engine. They arrive as plain data (typically JSON) and are
//! validated here; the engine never bakes in its own values.

use crate::error::OptimizeError;
use crate::item::SetType;
use crate::stat::{Stat, StatAxis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set-bonus definition: wearing `required` mods of `set_type` grants
/// `bonus` once per completed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBonus {
    pub set_type: SetType,
    /// Mods required per completed set: 2 or 4.
    pub required: u8,
    /// The stat granted per completed set.
    pub bonus: Stat,
}

impl SetBonus {
    pub fn new(set_type: SetType, required: u8, bonus: Stat) -> Self {
        Self {
            set_type,
            required,
            bonus,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameData {
    basic_weight_factors: HashMap<String, f64>,
    set_bonuses: Vec<SetBonus>,
}

/// Collaborator-supplied game constants.
///
/// # Examples
///
/// ```rust
/// use modopt::{GameData, SetBonus, SetType, Stat, StatAxis, StatType};
///
/// let mut factors = [1.0; StatAxis::COUNT];
/// factors[StatAxis::Speed.index()] = 0.05;
/// let data = GameData::new(
///     factors,
///     vec![SetBonus::new(SetType::Speed, 4, Stat::new(StatType::SpeedPct, 10.0))],
/// ).unwrap();
///
/// assert_eq!(data.basic_weight_factor(StatAxis::Speed), 0.05);
/// assert_eq!(data.set_bonus(SetType::Speed).unwrap().required, 4);
/// assert!(data.set_bonus(SetType::Potency).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    basic_weight_factors: [f64; StatAxis::COUNT],
    set_bonuses: Vec<SetBonus>,
}

impl GameData {
    /// Build game data from a full factor array (in [`StatAxis::ALL`]
    /// order) and a set-bonus table.
    pub fn new(
        basic_weight_factors: [f64; StatAxis::COUNT],
        mut set_bonuses: Vec<SetBonus>,
    ) -> Result<Self, OptimizeError> {
        for axis in StatAxis::ALL {
            let factor = basic_weight_factors[axis.index()];
            if !factor.is_finite() || factor == 0.0 {
                return Err(OptimizeError::InvalidGameData {
                    reason: format!("normalization factor for {axis} must be finite and non-zero"),
                });
            }
        }
        for bonus in &set_bonuses {
            if bonus.required != 2 && bonus.required != 4 {
                return Err(OptimizeError::InvalidGameData {
                    reason: format!(
                        "set {} requires {} mods; thresholds are 2 or 4",
                        bonus.set_type, bonus.required
                    ),
                });
            }
        }
        let mut seen = [false; SetType::COUNT];
        for bonus in &set_bonuses {
            if seen[bonus.set_type.index()] {
                return Err(OptimizeError::InvalidGameData {
                    reason: format!("duplicate set bonus for {}", bonus.set_type),
                });
            }
            seen[bonus.set_type.index()] = true;
        }
        // Canonical order keeps branch enumeration deterministic
        // regardless of how the collaborator ordered the table.
        set_bonuses.sort_by_key(|bonus| bonus.set_type);
        Ok(Self {
            basic_weight_factors,
            set_bonuses,
        })
    }

    /// Load game data from the collaborator's JSON document.
    ///
    /// Expected shape:
    ///
    /// ```json
    /// {
    ///   "basicWeightFactors": { "health": 0.0005, "speed": 0.05, ... },
    ///   "setBonuses": [
    ///     { "setType": "speed", "required": 4,
    ///       "bonus": { "stat": "speed%", "value": 10.0 } }
    ///   ]
    /// }
    /// ```
    ///
    /// Every axis must be present in `basicWeightFactors`.
    pub fn from_json_str(json: &str) -> Result<Self, OptimizeError> {
        let raw: RawGameData =
            serde_json::from_str(json).map_err(|err| OptimizeError::InvalidGameData {
                reason: err.to_string(),
            })?;

        let mut factors = [0.0; StatAxis::COUNT];
        for (name, factor) in &raw.basic_weight_factors {
            let axis = StatAxis::parse(name)?;
            factors[axis.index()] = *factor;
        }
        for axis in StatAxis::ALL {
            if !raw.basic_weight_factors.contains_key(axis.name()) {
                return Err(OptimizeError::InvalidGameData {
                    reason: format!("missing normalization factor for axis {axis}"),
                });
            }
        }
        Self::new(factors, raw.set_bonuses)
    }

    /// The basic-mode normalization factor for an axis.
    pub fn basic_weight_factor(&self, axis: StatAxis) -> f64 {
        self.basic_weight_factors[axis.index()]
    }

    /// The bonus definition for a set family, if that family grants one.
    pub fn set_bonus(&self, set_type: SetType) -> Option<&SetBonus> {
        self.set_bonuses
            .iter()
            .find(|bonus| bonus.set_type == set_type)
    }

    /// All set bonuses in canonical order.
    pub fn set_bonuses(&self) -> &[SetBonus] {
        &self.set_bonuses
    }
}
