//! Item pool module.
//!
//! The shared, shrinking inventory for one optimization run. The pool is
//! exclusively owned by the scheduler for the duration of a run: an item
//! is in exactly one of the pool or some character's assignment, never
//! both. Duplicate inserts and removals of absent mods are
//! [`OptimizeError::PoolInconsistency`].

use crate::error::OptimizeError;
use crate::item::{Mod, ModId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The mods available for assignment in the current run.
///
/// Iteration order is insertion order, which keeps runs deterministic
/// for identical input snapshots.
///
/// # Examples
///
/// ```rust
/// use modopt::{ItemPool, Mod, Slot, SetType, Stat, StatType};
///
/// let pool = ItemPool::from_mods(vec![
///     Mod::new("a", Slot::Arrow, SetType::Speed, 5, 15, Stat::new(StatType::Speed, 30.0)),
///     Mod::new("b", Slot::Cross, SetType::Health, 5, 15, Stat::new(StatType::HealthPct, 5.88)),
/// ]).unwrap();
///
/// assert_eq!(pool.len(), 2);
/// assert!(pool.contains(&"a".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPool {
    mods: HashMap<ModId, Mod>,
    order: Vec<ModId>,
}

impl ItemPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from an inventory snapshot.
    ///
    /// A duplicate id in the snapshot is a `PoolInconsistency`.
    pub fn from_mods(mods: Vec<Mod>) -> Result<Self, OptimizeError> {
        let mut pool = Self::new();
        for m in mods {
            pool.insert(m)?;
        }
        Ok(pool)
    }

    /// Add a mod to the pool.
    pub fn insert(&mut self, m: Mod) -> Result<(), OptimizeError> {
        if self.mods.contains_key(&m.id) {
            return Err(OptimizeError::PoolInconsistency {
                id: m.id,
                reason: "already present in pool".to_string(),
            });
        }
        self.order.push(m.id.clone());
        self.mods.insert(m.id.clone(), m);
        Ok(())
    }

    /// Number of mods remaining.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a mod is still in the pool.
    pub fn contains(&self, id: &ModId) -> bool {
        self.mods.contains_key(id)
    }

    /// Look up a mod by id.
    pub fn get(&self, id: &ModId) -> Option<&Mod> {
        self.mods.get(id)
    }

    /// Iterate over the remaining mods in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Mod> {
        self.order.iter().filter_map(move |id| self.mods.get(id))
    }

    /// Iterate over the remaining ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ModId> {
        self.order.iter()
    }

    /// Remove a finalized assignment's mods from the pool.
    ///
    /// Removing an id that is not present means the item was assigned
    /// twice or drawn from a different pool; that breaks the
    /// single-owner invariant and is fatal to the run.
    pub fn remove_all(&mut self, ids: &[ModId]) -> Result<(), OptimizeError> {
        for id in ids {
            if self.mods.remove(id).is_none() {
                return Err(OptimizeError::PoolInconsistency {
                    id: id.clone(),
                    reason: "not present in pool".to_string(),
                });
            }
        }
        self.order.retain(|id| self.mods.contains_key(id));
        Ok(())
    }
}

impl Serialize for ItemPool {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ItemPool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mods = Vec::<Mod>::deserialize(deserializer)?;
        ItemPool::from_mods(mods).map_err(serde::de::Error::custom)
    }
}
