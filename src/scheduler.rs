//! Assignment scheduler module.
//!
//! Drives the search engine across the ordered character list, removing
//! each chosen assignment from the pool before the next character runs.
//! The order is a user-controlled priority: the first character's needs
//! dominate. This is a deliberate greedy design, not a globally optimal
//! multi-character assignment -- a documented limitation, not a bug.
//!
//! Failures are per-character: an invalid plan or an infeasible search
//! is recorded in that character's outcome and the run continues.
//! A pool inconsistency is an invariant violation and aborts the run.

use crate::character::Character;
use crate::error::OptimizeError;
use crate::gamedata::GameData;
use crate::pool::ItemPool;
use crate::search::{Assignment, SearchEngine};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Cooperative cancellation flag for a running optimization.
///
/// Checked between characters (coarse-grained). Cancelling leaves the
/// already-completed assignments and the residual pool in a consistent,
/// resumable state.
///
/// # Examples
///
/// ```rust
/// use modopt::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// What happened to one character during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterOutcome {
    /// The search found an assignment; its mods left the pool.
    Assigned(Assignment),
    /// The character was skipped: invalid plan or infeasible search.
    /// The pool is untouched for this character.
    Failed {
        character: String,
        error: OptimizeError,
    },
    /// The run was cancelled before this character was processed.
    Cancelled { character: String },
}

impl CharacterOutcome {
    /// The character this outcome belongs to.
    pub fn character(&self) -> &str {
        match self {
            CharacterOutcome::Assigned(assignment) => &assignment.character,
            CharacterOutcome::Failed { character, .. } => character,
            CharacterOutcome::Cancelled { character } => character,
        }
    }

    /// The assignment, if one was made.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            CharacterOutcome::Assigned(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// The complete result of one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Per-character outcomes in the caller's priority order.
    pub outcomes: Vec<CharacterOutcome>,
    /// The unassigned remainder of the pool.
    pub residual: ItemPool,
}

impl RunResult {
    /// Iterate over the successful assignments in priority order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.outcomes.iter().filter_map(|o| o.assignment())
    }
}

/// Drives the search engine across an ordered character list.
///
/// # Examples
///
/// ```rust
/// use modopt::{GameData, ItemPool, Scheduler, StatAxis};
///
/// let data = GameData::new([1.0; StatAxis::COUNT], vec![]).unwrap();
/// let scheduler = Scheduler::new(&data);
/// let result = scheduler.optimize(&[], ItemPool::new()).unwrap();
/// assert!(result.outcomes.is_empty());
/// ```
pub struct Scheduler<'a> {
    engine: SearchEngine<'a>,
    cancel: CancelToken,
}

impl<'a> Scheduler<'a> {
    /// Create a scheduler over the given game data.
    pub fn new(data: &'a GameData) -> Self {
        Self {
            engine: SearchEngine::new(data),
            cancel: CancelToken::new(),
        }
    }

    /// Replace the search engine (e.g. to widen candidate retention).
    pub fn with_engine(mut self, engine: SearchEngine<'a>) -> Self {
        self.engine = engine;
        self
    }

    /// Attach a cancellation token shared with the caller.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle to cancel this scheduler's runs.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Process `characters` strictly in order against `pool`.
    ///
    /// Consumes the pool; the unassigned remainder comes back in the
    /// result. Per-character failures (invalid plan, infeasible search)
    /// are recorded and the run continues. Only a pool inconsistency --
    /// the single-owner invariant broken -- aborts the run with `Err`.
    pub fn optimize(
        &self,
        characters: &[Character],
        mut pool: ItemPool,
    ) -> Result<RunResult, OptimizeError> {
        let mut outcomes = Vec::with_capacity(characters.len());

        for character in characters {
            if self.cancel.is_cancelled() {
                outcomes.push(CharacterOutcome::Cancelled {
                    character: character.name.clone(),
                });
                continue;
            }

            let plan = match character.effective_plan() {
                Ok(plan) => plan,
                Err(error) => {
                    warn!(character = %character.name, %error, "plan resolution failed");
                    outcomes.push(CharacterOutcome::Failed {
                        character: character.name.clone(),
                        error,
                    });
                    continue;
                }
            };
            if let Err(error) = plan.validate() {
                warn!(character = %character.name, %error, "plan validation failed");
                outcomes.push(CharacterOutcome::Failed {
                    character: character.name.clone(),
                    error,
                });
                continue;
            }

            match self.engine.assign_best(character, plan, &pool) {
                Ok(assignment) => {
                    pool.remove_all(&assignment.mod_ids())?;
                    info!(
                        character = %character.name,
                        value = assignment.value,
                        pool_remaining = pool.len(),
                        "assignment chosen"
                    );
                    outcomes.push(CharacterOutcome::Assigned(assignment));
                }
                Err(error @ OptimizeError::Infeasible { .. }) => {
                    warn!(character = %character.name, %error, "character not dressed");
                    outcomes.push(CharacterOutcome::Failed {
                        character: character.name.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(RunResult {
            outcomes,
            residual: pool,
        })
    }
}
