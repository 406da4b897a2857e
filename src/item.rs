//! Mod (item) module.
//!
//! Provides the immutable item entity: the six-slot enumeration, the set
//! types that grant compounding bonuses, and the mod itself with its
//! primary and secondary stat lines. The engine only reads mods; it
//! never mutates their stats.

use crate::error::OptimizeError;
use crate::stat::{Stat, StatSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Interned string identifier for mods.
///
/// Uses `Arc<str>` for memory efficiency and fast comparison; the search
/// engine clones ids freely while assembling candidate assignments.
///
/// # Examples
///
/// ```rust
/// use modopt::ModId;
///
/// let a = ModId::from_str("mod-001");
/// let b: ModId = "mod-001".into();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModId(Arc<str>);

impl ModId {
    /// Create a new `ModId` from a string slice.
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this `ModId`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ModId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for ModId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ModId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ModId::from(s))
    }
}

/// The six fixed mod positions. A character wears exactly one mod per
/// slot.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    Square,
    Arrow,
    Diamond,
    Triangle,
    Circle,
    Cross,
}

impl Slot {
    /// Number of slots.
    pub const COUNT: usize = 6;

    /// All slots in wear order.
    pub const ALL: [Slot; Self::COUNT] = [
        Slot::Square,
        Slot::Arrow,
        Slot::Diamond,
        Slot::Triangle,
        Slot::Circle,
        Slot::Cross,
    ];

    /// Position of this slot in [`Slot::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The slot name as the inventory collaborator spells it.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Square => "square",
            Slot::Arrow => "arrow",
            Slot::Diamond => "diamond",
            Slot::Triangle => "triangle",
            Slot::Circle => "circle",
            Slot::Cross => "cross",
        }
    }

    /// Parse a slot from its collaborator-facing name.
    pub fn parse(name: &str) -> Result<Self, OptimizeError> {
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.name() == name)
            .ok_or_else(|| OptimizeError::InvalidGameData {
                reason: format!("unknown slot: {name}"),
            })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Slot::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Which set-bonus family a mod belongs to.
///
/// Wearing a threshold count of mods sharing a set type (2 or 4,
/// depending on the family — see
/// [`SetBonus`](crate::gamedata::SetBonus)) grants an additional stat
/// bonus.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetType {
    Health,
    Defense,
    CritDmg,
    CritChance,
    Tenacity,
    Offense,
    Potency,
    Speed,
}

impl SetType {
    /// Number of set families.
    pub const COUNT: usize = 8;

    /// All set families in canonical order.
    pub const ALL: [SetType; Self::COUNT] = [
        SetType::Health,
        SetType::Defense,
        SetType::CritDmg,
        SetType::CritChance,
        SetType::Tenacity,
        SetType::Offense,
        SetType::Potency,
        SetType::Speed,
    ];

    /// Position of this set family in [`SetType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The set name as the inventory collaborator spells it.
    pub fn name(self) -> &'static str {
        match self {
            SetType::Health => "health",
            SetType::Defense => "defense",
            SetType::CritDmg => "critDmg",
            SetType::CritChance => "critChance",
            SetType::Tenacity => "tenacity",
            SetType::Offense => "offense",
            SetType::Potency => "potency",
            SetType::Speed => "speed",
        }
    }

    /// Parse a set family from its collaborator-facing name.
    pub fn parse(name: &str) -> Result<Self, OptimizeError> {
        SetType::ALL
            .iter()
            .copied()
            .find(|set| set.name() == name)
            .ok_or_else(|| OptimizeError::InvalidGameData {
                reason: format!("unknown set type: {name}"),
            })
    }
}

impl std::fmt::Display for SetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for SetType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SetType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SetType::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A secondary stat line on a mod.
///
/// Secondaries below the mod's reveal level are locked; locked
/// secondaries contribute nothing until revealed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Secondary {
    /// The stat line.
    pub stat: Stat,
    /// Whether the line has been revealed.
    pub revealed: bool,
}

/// A wearable enhancement item.
///
/// Immutable once read from the inventory collaborator: the engine only
/// reads mods and tracks which pool or assignment currently holds them.
///
/// # Examples
///
/// ```rust
/// use modopt::{Mod, Slot, SetType, Stat, StatType};
///
/// let arrow = Mod::new("mod-001", Slot::Arrow, SetType::Speed, 5, 15,
///     Stat::new(StatType::Speed, 30.0))
///     .with_secondary(Stat::new(StatType::Health, 500.0))
///     .with_locked_secondary(Stat::new(StatType::OffensePct, 1.5));
///
/// let contribution = arrow.contribution();
/// assert_eq!(contribution.get(StatType::Speed), 30.0);
/// assert_eq!(contribution.get(StatType::Health), 500.0);
/// // The locked secondary is excluded until revealed.
/// assert_eq!(contribution.get(StatType::OffensePct), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    /// Unique identity.
    pub id: ModId,
    /// The slot this mod occupies.
    pub slot: Slot,
    /// The set-bonus family this mod counts toward.
    pub set_type: SetType,
    /// Rarity, 1-6 dots.
    pub dots: u8,
    /// Upgrade level, 1-15.
    pub level: u8,
    /// The primary stat line, fixed by the slot type.
    pub primary: Stat,
    /// Up to four secondary lines, in reveal order.
    pub secondaries: Vec<Secondary>,
}

impl Mod {
    /// Create a mod with a primary stat and no secondaries.
    pub fn new(
        id: impl Into<ModId>,
        slot: Slot,
        set_type: SetType,
        dots: u8,
        level: u8,
        primary: Stat,
    ) -> Self {
        Self {
            id: id.into(),
            slot,
            set_type,
            dots,
            level,
            primary,
            secondaries: Vec::new(),
        }
    }

    /// Append a revealed secondary line.
    pub fn with_secondary(mut self, stat: Stat) -> Self {
        self.secondaries.push(Secondary {
            stat,
            revealed: true,
        });
        self
    }

    /// Append a locked secondary line.
    pub fn with_locked_secondary(mut self, stat: Stat) -> Self {
        self.secondaries.push(Secondary {
            stat,
            revealed: false,
        });
        self
    }

    /// The mod's stat contribution: primary plus revealed secondaries.
    pub fn contribution(&self) -> StatSet {
        let mut set = StatSet::new();
        set.add_stat(self.primary);
        for secondary in &self.secondaries {
            if secondary.revealed {
                set.add_stat(secondary.stat);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::StatType;

    #[test]
    fn test_mod_id_interning() {
        let a = ModId::from_str("mod-1");
        let b = ModId::from_str("mod-1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "mod-1");
    }

    #[test]
    fn test_slot_parse_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::parse(slot.name()).unwrap(), slot);
        }
        assert!(Slot::parse("pentagon").is_err());
    }

    #[test]
    fn test_set_type_parse_roundtrip() {
        for set in SetType::ALL {
            assert_eq!(SetType::parse(set.name()).unwrap(), set);
        }
    }

    #[test]
    fn test_contribution_includes_revealed_only() {
        let m = Mod::new(
            "mod-1",
            Slot::Arrow,
            SetType::Speed,
            5,
            12,
            Stat::new(StatType::Speed, 30.0),
        )
        .with_secondary(Stat::new(StatType::Speed, 5.0))
        .with_locked_secondary(Stat::new(StatType::Health, 500.0));

        let contribution = m.contribution();
        assert_eq!(contribution.get(StatType::Speed), 35.0);
        assert_eq!(contribution.get(StatType::Health), 0.0);
    }

    #[test]
    fn test_mod_serde_roundtrip() {
        let m = Mod::new(
            "mod-1",
            Slot::Cross,
            SetType::Potency,
            6,
            15,
            Stat::new(StatType::PotencyPct, 24.0),
        )
        .with_secondary(Stat::new(StatType::Speed, 4.0));

        let json = serde_json::to_string(&m).unwrap();
        let back: Mod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
