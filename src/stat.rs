//! Stat model module.
//!
//! Provides the fixed enumeration of weightable stat axes, the concrete
//! stat lines that appear on mods and set bonuses (including the derived
//! percent variants), and the `StatSet` snapshot type used as the value
//! function's input.

use crate::error::OptimizeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The eleven weightable stat axes.
///
/// These are the axes an [`OptimizationPlan`](crate::OptimizationPlan)
/// assigns weights to. Percent variants of a stat line collapse onto the
/// same axis for weighting purposes (a flat speed bonus and a percent
/// speed bonus are both worth `weight(Speed)` per point of final speed).
///
/// # Examples
///
/// ```rust
/// use modopt::StatAxis;
///
/// let axis = StatAxis::parse("critDmg").unwrap();
/// assert_eq!(axis, StatAxis::CritDmg);
/// assert!(StatAxis::parse("luck").is_err());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatAxis {
    Health,
    Protection,
    Speed,
    CritDmg,
    Potency,
    Tenacity,
    Offense,
    CritChance,
    Defense,
    Accuracy,
    CritAvoid,
}

impl StatAxis {
    /// Number of weightable axes.
    pub const COUNT: usize = 11;

    /// All axes in canonical order.
    pub const ALL: [StatAxis; Self::COUNT] = [
        StatAxis::Health,
        StatAxis::Protection,
        StatAxis::Speed,
        StatAxis::CritDmg,
        StatAxis::Potency,
        StatAxis::Tenacity,
        StatAxis::Offense,
        StatAxis::CritChance,
        StatAxis::Defense,
        StatAxis::Accuracy,
        StatAxis::CritAvoid,
    ];

    /// Position of this axis in [`StatAxis::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis name as the roster collaborator spells it.
    pub fn name(self) -> &'static str {
        match self {
            StatAxis::Health => "health",
            StatAxis::Protection => "protection",
            StatAxis::Speed => "speed",
            StatAxis::CritDmg => "critDmg",
            StatAxis::Potency => "potency",
            StatAxis::Tenacity => "tenacity",
            StatAxis::Offense => "offense",
            StatAxis::CritChance => "critChance",
            StatAxis::Defense => "defense",
            StatAxis::Accuracy => "accuracy",
            StatAxis::CritAvoid => "critAvoid",
        }
    }

    /// Parse an axis from its collaborator-facing name.
    ///
    /// Unknown names are an [`OptimizeError::UnknownAxis`]; this is how a
    /// plan referencing an axis the engine does not know is rejected
    /// before a run starts.
    pub fn parse(name: &str) -> Result<Self, OptimizeError> {
        StatAxis::ALL
            .iter()
            .copied()
            .find(|axis| axis.name() == name)
            .ok_or_else(|| OptimizeError::UnknownAxis {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Display for StatAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A concrete stat line as it appears on a mod or a set bonus.
///
/// The weightable axes plus their derived percent variants. Percent
/// variants of Health, Protection, Speed, Offense, and Defense scale off
/// the character's base stats before weighting; the inherently
/// percentage-point lines (crit chance, crit damage, potency, tenacity,
/// accuracy, crit avoidance) are weighted per percentage point directly.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatType {
    Health,
    HealthPct,
    Protection,
    ProtectionPct,
    Speed,
    SpeedPct,
    Offense,
    OffensePct,
    Defense,
    DefensePct,
    CritChancePct,
    CritDmgPct,
    PotencyPct,
    TenacityPct,
    AccuracyPct,
    CritAvoidPct,
}

impl StatType {
    /// Number of concrete stat lines.
    pub const COUNT: usize = 16;

    /// All stat lines in canonical order.
    pub const ALL: [StatType; Self::COUNT] = [
        StatType::Health,
        StatType::HealthPct,
        StatType::Protection,
        StatType::ProtectionPct,
        StatType::Speed,
        StatType::SpeedPct,
        StatType::Offense,
        StatType::OffensePct,
        StatType::Defense,
        StatType::DefensePct,
        StatType::CritChancePct,
        StatType::CritDmgPct,
        StatType::PotencyPct,
        StatType::TenacityPct,
        StatType::AccuracyPct,
        StatType::CritAvoidPct,
    ];

    /// Position of this stat line in [`StatType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The weightable axis this stat line contributes to.
    pub fn axis(self) -> StatAxis {
        match self {
            StatType::Health | StatType::HealthPct => StatAxis::Health,
            StatType::Protection | StatType::ProtectionPct => StatAxis::Protection,
            StatType::Speed | StatType::SpeedPct => StatAxis::Speed,
            StatType::Offense | StatType::OffensePct => StatAxis::Offense,
            StatType::Defense | StatType::DefensePct => StatAxis::Defense,
            StatType::CritChancePct => StatAxis::CritChance,
            StatType::CritDmgPct => StatAxis::CritDmg,
            StatType::PotencyPct => StatAxis::Potency,
            StatType::TenacityPct => StatAxis::Tenacity,
            StatType::AccuracyPct => StatAxis::Accuracy,
            StatType::CritAvoidPct => StatAxis::CritAvoid,
        }
    }

    /// Whether this line is a percentage of the character's base stat.
    ///
    /// Scaling lines are converted to a flat-equivalent magnitude via
    /// [`BaseStats`](crate::BaseStats) before weighting, so that percent
    /// and flat lines of the same axis are comparable.
    pub fn scales_with_base(self) -> bool {
        matches!(
            self,
            StatType::HealthPct
                | StatType::ProtectionPct
                | StatType::SpeedPct
                | StatType::OffensePct
                | StatType::DefensePct
        )
    }

    /// The stat line name as the inventory collaborator spells it.
    pub fn name(self) -> &'static str {
        match self {
            StatType::Health => "health",
            StatType::HealthPct => "health%",
            StatType::Protection => "protection",
            StatType::ProtectionPct => "protection%",
            StatType::Speed => "speed",
            StatType::SpeedPct => "speed%",
            StatType::Offense => "offense",
            StatType::OffensePct => "offense%",
            StatType::Defense => "defense",
            StatType::DefensePct => "defense%",
            StatType::CritChancePct => "critChance%",
            StatType::CritDmgPct => "critDmg%",
            StatType::PotencyPct => "potency%",
            StatType::TenacityPct => "tenacity%",
            StatType::AccuracyPct => "accuracy%",
            StatType::CritAvoidPct => "critAvoid%",
        }
    }

    /// Parse a stat line from its collaborator-facing name.
    pub fn parse(name: &str) -> Result<Self, OptimizeError> {
        StatType::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == name)
            .ok_or_else(|| OptimizeError::UnknownAxis {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for StatType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StatType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StatType::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A single stat line with its magnitude.
///
/// Percent lines store the percentage as written on the item, e.g. a
/// "+1.25% health" secondary is `Stat::new(StatType::HealthPct, 1.25)`.
///
/// # Examples
///
/// ```rust
/// use modopt::{Stat, StatType};
///
/// let line = Stat::new(StatType::Speed, 6.0);
/// assert_eq!(line.stat, StatType::Speed);
/// assert_eq!(line.value, 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// The stat line kind.
    pub stat: StatType,
    /// The magnitude as written on the item or bonus.
    pub value: f64,
}

impl Stat {
    /// Create a new stat line.
    pub fn new(stat: StatType, value: f64) -> Self {
        Self { stat, value }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.stat)
    }
}

/// A snapshot of stat contributions, one slot per concrete stat line.
///
/// Backed by a fixed array so it is `Copy` and allocation-free; the
/// search engine builds and sums these in its inner loop. Treated as
/// immutable once fully computed.
///
/// # Examples
///
/// ```rust
/// use modopt::{Stat, StatSet, StatType};
///
/// let mut set = StatSet::new();
/// set.add(StatType::Speed, 6.0);
/// set.add_stat(Stat::new(StatType::Speed, 4.0));
///
/// assert_eq!(set.get(StatType::Speed), 10.0);
/// assert_eq!(set.get(StatType::Health), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatSet {
    values: [f64; StatType::COUNT],
}

impl StatSet {
    /// Create an empty stat set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated magnitude for a stat line.
    pub fn get(&self, stat: StatType) -> f64 {
        self.values[stat.index()]
    }

    /// Add a magnitude to a stat line.
    pub fn add(&mut self, stat: StatType, value: f64) {
        self.values[stat.index()] += value;
    }

    /// Add a [`Stat`] line.
    pub fn add_stat(&mut self, line: Stat) {
        self.add(line.stat, line.value);
    }

    /// Merge another set into this one (entry-wise sum).
    pub fn merge(&mut self, other: &StatSet) {
        for (value, other_value) in self.values.iter_mut().zip(other.values.iter()) {
            *value += other_value;
        }
    }

    /// Iterate over the non-zero entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatType, f64)> + '_ {
        StatType::ALL
            .iter()
            .map(move |&stat| (stat, self.values[stat.index()]))
            .filter(|&(_, value)| value != 0.0)
    }

    /// Whether every entry is zero.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&value| value == 0.0)
    }
}
