//! Search engine module.
//!
//! Finds, for one character and a pool snapshot, the six-mod assignment
//! that maximizes the value function, honoring slot compatibility and
//! set-bonus composition.
//!
//! Exhaustive enumeration over all slot combinations is intractable for
//! realistic pools, so the search is bounded in two ways:
//!
//! 1. **Per-slot pruning**: candidates are scored individually and only
//!    the top K per slot are retained (plus the best few of each set
//!    family, so no set branch loses its members).
//! 2. **Set-branch enumeration**: set bonuses are drawn from a small
//!    table, so every multiset of set pursuits that fits in six slots is
//!    enumerated exactly. Within a branch each slot is filled
//!    independently -- every mod belongs to exactly one slot, so per-slot
//!    choices cannot conflict -- which makes the branch optimum a per-slot
//!    argmax rather than a combinatorial search.
//!
//! Branch winners are rescored with the full assignment value (actual
//! completed sets counted), so a set completed incidentally by free
//! slots is still credited.
//!
//! The engine never mutates the pool; removal is the scheduler's job.
//! That separation lets the search be tested in isolation against a
//! fixed pool snapshot.

use crate::character::Character;
use crate::error::OptimizeError;
use crate::gamedata::{GameData, SetBonus};
use crate::item::{Mod, ModId, SetType, Slot};
use crate::plan::OptimizationPlan;
use crate::pool::ItemPool;
use crate::value::{score_assignment, score_mod};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Relative tolerance for treating two assignment values as a tie.
const VALUE_EPSILON: f64 = 1e-9;

/// Default per-slot candidate retention.
const DEFAULT_TOP_K: usize = 10;

/// Candidates of each set family kept per slot beyond the overall top-K.
const PER_SET_KEEP: usize = 2;

/// A finalized six-mod choice for one character.
///
/// Mods are stored in [`Slot::ALL`] order. `value` is the achieved
/// objective value, set bonuses included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The character this assignment dresses.
    pub character: String,
    mods: Vec<Mod>,
    /// The value-function result for the chosen mods.
    pub value: f64,
}

impl Assignment {
    /// The chosen mods in slot order.
    pub fn mods(&self) -> &[Mod] {
        &self.mods
    }

    /// The chosen mod ids in slot order.
    pub fn mod_ids(&self) -> Vec<ModId> {
        self.mods.iter().map(|m| m.id.clone()).collect()
    }

    /// The mod chosen for a slot.
    pub fn mod_for_slot(&self, slot: Slot) -> Option<&Mod> {
        self.mods.iter().find(|m| m.slot == slot)
    }

    /// Number of mods used.
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// Whether no mods were assigned.
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

/// A scored candidate within one slot bucket.
#[derive(Clone, Copy)]
struct Candidate<'p> {
    m: &'p Mod,
    score: f64,
}

/// The per-character solver.
///
/// # Examples
///
/// ```rust
/// use modopt::{GameData, SearchEngine, StatAxis};
///
/// let data = GameData::new([1.0; StatAxis::COUNT], vec![]).unwrap();
/// let engine = SearchEngine::new(&data).with_top_k(16);
/// # let _ = engine;
/// ```
pub struct SearchEngine<'a> {
    data: &'a GameData,
    top_k: usize,
}

impl<'a> SearchEngine<'a> {
    /// Create an engine over the given game data.
    pub fn new(data: &'a GameData) -> Self {
        Self {
            data,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the per-slot candidate retention (minimum 1).
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Find the best assignment for `character` against `pool`.
    ///
    /// Returns [`OptimizeError::Infeasible`] when some slot has no
    /// eligible candidate (equivalently, fewer than six eligible mods
    /// remain across the required slots); otherwise always returns a
    /// full six-mod assignment, however poor.
    pub fn assign_best(
        &self,
        character: &Character,
        plan: &OptimizationPlan,
        pool: &ItemPool,
    ) -> Result<Assignment, OptimizeError> {
        let base = &character.base_stats;

        // Eligibility filter and per-slot bucketing.
        let mut buckets: [Vec<Candidate<'_>>; Slot::COUNT] = Default::default();
        for m in pool.iter() {
            if character.use_only_5_dot_mods && m.dots < 5 {
                continue;
            }
            buckets[m.slot.index()].push(Candidate {
                m,
                score: score_mod(m, base, plan, self.data),
            });
        }

        for slot in Slot::ALL {
            if buckets[slot.index()].is_empty() {
                return Err(OptimizeError::Infeasible {
                    character: character.name.clone(),
                    slot,
                });
            }
        }

        for bucket in &mut buckets {
            sort_candidates(bucket);
            prune_candidates(bucket, self.top_k);
        }

        // Best candidate per (slot, set family), for branch slot-fill.
        let mut best_per_set: [[Option<Candidate<'_>>; SetType::COUNT]; Slot::COUNT] =
            [[None; SetType::COUNT]; Slot::COUNT];
        for (slot_idx, bucket) in buckets.iter().enumerate() {
            for candidate in bucket {
                let entry = &mut best_per_set[slot_idx][candidate.m.set_type.index()];
                if entry.is_none() {
                    *entry = Some(*candidate);
                }
            }
        }

        let profiles = enumerate_profiles(self.data.set_bonuses());

        let mut best: Option<(f64, Vec<&Mod>)> = None;
        let mut partitions_tried = 0usize;

        for profile in &profiles {
            let groups: Vec<(SetType, u8)> = profile
                .iter()
                .map(|&(bonus, copies)| (bonus.set_type, bonus.required * copies))
                .collect();

            for_each_partition(&groups, |slot_sets| {
                partitions_tried += 1;

                let mut picks: Vec<&Mod> = Vec::with_capacity(Slot::COUNT);
                for slot_idx in 0..Slot::COUNT {
                    let candidate = match slot_sets[slot_idx] {
                        None => buckets[slot_idx][0],
                        Some(set) => match best_per_set[slot_idx][set.index()] {
                            Some(candidate) => candidate,
                            // No eligible mod of this family in the slot.
                            None => return,
                        },
                    };
                    picks.push(candidate.m);
                }

                let value = score_assignment(&picks, base, plan, self.data);
                if is_better(value, &picks, &best) {
                    best = Some((value, picks));
                }
            });
        }

        debug!(
            character = %character.name,
            profiles = profiles.len(),
            partitions = partitions_tried,
            "search space explored"
        );

        // The empty profile always yields a complete partition, so a
        // best assignment exists once the feasibility gate has passed.
        let (value, picks) = best.expect("empty set-bonus profile always produces a candidate");
        Ok(Assignment {
            character: character.name.clone(),
            mods: picks.into_iter().cloned().collect(),
            value,
        })
    }
}

/// Deterministic candidate order: score desc, then dots desc, then id.
fn sort_candidates(bucket: &mut [Candidate<'_>]) {
    bucket.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.m.dots.cmp(&a.m.dots))
            .then_with(|| a.m.id.cmp(&b.m.id))
    });
}

/// Retain the top K candidates plus the leading few of each set family.
fn prune_candidates(bucket: &mut Vec<Candidate<'_>>, top_k: usize) {
    if bucket.len() <= top_k {
        return;
    }
    let mut kept = Vec::with_capacity(top_k);
    let mut per_set = [0usize; SetType::COUNT];
    for candidate in bucket.drain(..) {
        let set_idx = candidate.m.set_type.index();
        if kept.len() < top_k || per_set[set_idx] < PER_SET_KEEP {
            per_set[set_idx] += 1;
            kept.push(candidate);
        }
    }
    *bucket = kept;
}

/// Enumerate every multiset of set pursuits that fits in six slots.
///
/// Each profile is a list of `(bonus, copies)` pairs; the empty profile
/// (no set pursued) comes first. Order is deterministic because the
/// game data keeps its bonus table in canonical order.
fn enumerate_profiles(bonuses: &[SetBonus]) -> Vec<Vec<(&SetBonus, u8)>> {
    fn recurse<'d>(
        bonuses: &'d [SetBonus],
        index: usize,
        slots_left: u8,
        current: &mut Vec<(&'d SetBonus, u8)>,
        out: &mut Vec<Vec<(&'d SetBonus, u8)>>,
    ) {
        if index == bonuses.len() {
            out.push(current.clone());
            return;
        }
        let bonus = &bonuses[index];
        let max_copies = slots_left / bonus.required;
        // copies = 0 first keeps the empty profile at the front.
        for copies in 0..=max_copies {
            if copies > 0 {
                current.push((bonus, copies));
            }
            recurse(
                bonuses,
                index + 1,
                slots_left - copies * bonus.required,
                current,
                out,
            );
            if copies > 0 {
                current.pop();
            }
        }
    }

    let mut out = Vec::new();
    let mut current = Vec::new();
    recurse(bonuses, 0, Slot::COUNT as u8, &mut current, &mut out);
    out
}

/// Visit every way of dedicating slots to the profile's set groups.
///
/// `groups` maps each pursued family to the number of slots it must
/// occupy; remaining slots are free. The visitor receives, per slot,
/// the family that slot is committed to (or `None` for free).
fn for_each_partition(groups: &[(SetType, u8)], mut visit: impl FnMut(&[Option<SetType>; Slot::COUNT])) {
    fn recurse(
        groups: &[(SetType, u8)],
        remaining: &mut [u8],
        slot_idx: usize,
        assign: &mut [Option<SetType>; Slot::COUNT],
        visit: &mut impl FnMut(&[Option<SetType>; Slot::COUNT]),
    ) {
        let needed: u8 = remaining.iter().sum();
        let slots_left = (Slot::COUNT - slot_idx) as u8;
        if needed > slots_left {
            return;
        }
        if slot_idx == Slot::COUNT {
            visit(assign);
            return;
        }

        // Leave this slot free.
        assign[slot_idx] = None;
        recurse(groups, remaining, slot_idx + 1, assign, visit);

        // Or commit it to a group with quota left.
        for group_idx in 0..groups.len() {
            if remaining[group_idx] == 0 {
                continue;
            }
            remaining[group_idx] -= 1;
            assign[slot_idx] = Some(groups[group_idx].0);
            recurse(groups, remaining, slot_idx + 1, assign, visit);
            assign[slot_idx] = None;
            remaining[group_idx] += 1;
        }
    }

    let mut remaining: Vec<u8> = groups.iter().map(|&(_, count)| count).collect();
    let mut assign = [None; Slot::COUNT];
    recurse(groups, &mut remaining, 0, &mut assign, &mut visit);
}

/// Whether `value`/`picks` beats the current best.
///
/// Within epsilon of a tie: prefer fewer mods, then higher summed dot
/// count, then lexicographically smaller ids. Deterministic.
fn is_better(value: f64, picks: &[&Mod], best: &Option<(f64, Vec<&Mod>)>) -> bool {
    let Some((best_value, best_picks)) = best else {
        return true;
    };
    let epsilon = VALUE_EPSILON * best_value.abs().max(1.0);
    if value > best_value + epsilon {
        return true;
    }
    if value < best_value - epsilon {
        return false;
    }
    tie_break(picks, best_picks) == Ordering::Less
}

fn tie_break(a: &[&Mod], b: &[&Mod]) -> Ordering {
    let dots = |mods: &[&Mod]| mods.iter().map(|m| u32::from(m.dots)).sum::<u32>();
    a.len()
        .cmp(&b.len())
        .then_with(|| dots(b).cmp(&dots(a)))
        .then_with(|| {
            for (x, y) in a.iter().zip(b.iter()) {
                match x.id.cmp(&y.id) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        })
}
