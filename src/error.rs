//! Error types for the optimization engine.
//!
//! All errors that can occur while validating plans, loading game data,
//! or running an optimization are represented by the `OptimizeError`
//! enum.

use crate::item::{ModId, Slot};
use crate::stat::StatAxis;
use thiserror::Error;

/// Errors that can occur during an optimization run.
///
/// `Infeasible` is a per-character outcome: the scheduler records it and
/// continues with the remaining characters. `PoolInconsistency` means the
/// single-owner pool invariant was broken and aborts the run.
///
/// # Examples
///
/// ```rust
/// use modopt::OptimizeError;
///
/// let err = OptimizeError::UnknownAxis { name: "luck".to_string() };
/// println!("{}", err); // "Unknown stat axis: luck"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizeError {
    /// A plan or game-data table references a stat axis the engine does
    /// not know.
    #[error("Unknown stat axis: {name}")]
    UnknownAxis { name: String },

    /// A character references a named plan that is not stored on it.
    #[error("Character {character} references unknown plan: {plan}")]
    UnknownPlan { character: String, plan: String },

    /// A plan weight is NaN or infinite.
    #[error("Weight for axis {axis} is not finite")]
    InvalidWeight { axis: StatAxis },

    /// The collaborator-supplied game-data constants failed validation.
    #[error("Invalid game data: {reason}")]
    InvalidGameData { reason: String },

    /// Not enough eligible mods remain to fill a character's six slots.
    ///
    /// Names the first slot with no eligible candidate. Recorded
    /// per-character; does not abort the run.
    #[error("Cannot dress {character}: no eligible mod for slot {slot}")]
    Infeasible { character: String, slot: Slot },

    /// A mod was assigned twice or removed from a pool that does not
    /// contain it. This is an invariant violation and aborts the run.
    #[error("Pool inconsistency for mod {id}: {reason}")]
    PoolInconsistency { id: ModId, reason: String },
}
