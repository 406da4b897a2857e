//! Optimization plan module.
//!
//! A plan is a weight vector over the eleven stat axes plus a mode flag.
//! Basic-mode weights are normalized against expected in-game stat
//! ranges at evaluation time (the per-axis constants come from
//! [`GameData`](crate::GameData)); advanced-mode weights are applied
//! directly, one unit of weight per unit of raw stat.

use crate::error::OptimizeError;
use crate::gamedata::GameData;
use crate::stat::StatAxis;
use serde::{Deserialize, Serialize};

/// How plan weights are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// Weights are normalized by a fixed per-axis scale factor so that
    /// equal weights imply roughly equal real-world tradeoff.
    #[default]
    Basic,
    /// Weights are direct per-point values.
    Advanced,
}

/// A weight vector over the stat axes.
///
/// Raw weights sit roughly in `[-100, 100]` in basic mode; negative
/// weights actively penalize a stat.
///
/// # Examples
///
/// ```rust
/// use modopt::{OptimizationPlan, PlanMode, StatAxis};
///
/// let plan = OptimizationPlan::new(PlanMode::Advanced)
///     .with_weight(StatAxis::Speed, 100.0)
///     .with_weight(StatAxis::Health, 0.1);
///
/// assert_eq!(plan.weight(StatAxis::Speed), 100.0);
/// assert_eq!(plan.weight(StatAxis::Potency), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    weights: [f64; StatAxis::COUNT],
    /// How the weights are interpreted at evaluation time.
    pub mode: PlanMode,
}

impl OptimizationPlan {
    /// Create a plan with all weights zero.
    pub fn new(mode: PlanMode) -> Self {
        Self {
            weights: [0.0; StatAxis::COUNT],
            mode,
        }
    }

    /// Create a plan from a full weight array in [`StatAxis::ALL`] order.
    pub fn from_weights(weights: [f64; StatAxis::COUNT], mode: PlanMode) -> Self {
        Self { weights, mode }
    }

    /// Create a plan from collaborator-supplied `(axis name, weight)`
    /// pairs.
    ///
    /// An unknown axis name is an [`OptimizeError::UnknownAxis`],
    /// surfaced before a run starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modopt::{OptimizationPlan, PlanMode};
    ///
    /// let plan = OptimizationPlan::from_named_weights(
    ///     [("speed".to_string(), 100.0), ("critDmg".to_string(), 50.0)],
    ///     PlanMode::Basic,
    /// ).unwrap();
    ///
    /// assert!(OptimizationPlan::from_named_weights(
    ///     [("luck".to_string(), 1.0)],
    ///     PlanMode::Basic,
    /// ).is_err());
    /// ```
    pub fn from_named_weights(
        weights: impl IntoIterator<Item = (String, f64)>,
        mode: PlanMode,
    ) -> Result<Self, OptimizeError> {
        let mut plan = Self::new(mode);
        for (name, weight) in weights {
            let axis = StatAxis::parse(&name)?;
            plan.weights[axis.index()] = weight;
        }
        Ok(plan)
    }

    /// Set a weight, builder style.
    pub fn with_weight(mut self, axis: StatAxis, weight: f64) -> Self {
        self.weights[axis.index()] = weight;
        self
    }

    /// The raw weight for an axis.
    pub fn weight(&self, axis: StatAxis) -> f64 {
        self.weights[axis.index()]
    }

    /// The weight actually applied per point of flat stat.
    ///
    /// Basic-mode weights are multiplied by the per-axis normalization
    /// constant from the game data; advanced-mode weights pass through.
    pub fn effective_weight(&self, axis: StatAxis, data: &GameData) -> f64 {
        match self.mode {
            PlanMode::Basic => self.weights[axis.index()] * data.basic_weight_factor(axis),
            PlanMode::Advanced => self.weights[axis.index()],
        }
    }

    /// Reject NaN or infinite weights before a run starts.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        for axis in StatAxis::ALL {
            if !self.weights[axis.index()].is_finite() {
                return Err(OptimizeError::InvalidWeight { axis });
            }
        }
        Ok(())
    }
}

impl Default for OptimizationPlan {
    fn default() -> Self {
        Self::new(PlanMode::Basic)
    }
}
