//! # modopt - Deterministic Mod Value & Assignment Engine
//!
//! An optimization engine for squad RPG rosters that provides:
//! - **Deterministic** assignment (same roster, plans, and pool → same
//!   result)
//! - **Hardcode-free** game constants (normalization factors and set
//!   bonuses arrive as collaborator data, never baked in)
//! - **Greedy priority order** (the first character's needs dominate; a
//!   documented design choice, not a defect)
//! - **Partial-failure semantics** (a character that cannot be dressed
//!   is recorded and the run continues)
//!
//! ## Core Concepts
//!
//! ### Optimization Pipeline
//!
//! Each character flows through a simple pipeline:
//!
//! ```text
//! [OptimizationPlan] → [SearchEngine over ItemPool] → [Assignment]
//! ```
//!
//! 1. The **plan** turns a character's stat preferences into a value
//!    function over item stat contributions
//! 2. The **search engine** finds the best six-mod assignment from the
//!    shared pool, set bonuses included
//! 3. The **scheduler** walks the priority-ordered character list,
//!    shrinking the pool after each character
//!
//! ### Key Features
//!
//! - **Two weight modes**: basic (normalized against expected in-game
//!   stat ranges) and advanced (direct per-point value)
//! - **Percent conversion**: percent stat lines are converted to flat
//!   equivalents via the character's base stats before weighting
//! - **Bounded search**: per-slot candidate pruning combined with exact
//!   enumeration of set-bonus branches
//! - **Cooperative cancellation**: long runs can be aborted between
//!   characters without corrupting pool state
//!
//! ## Example
//!
//! ```rust
//! use modopt::*;
//!
//! let data = GameData::new([1.0; StatAxis::COUNT], vec![]).unwrap();
//!
//! let mods: Vec<Mod> = Slot::ALL
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &slot)| {
//!         Mod::new(format!("mod-{i}"), slot, SetType::Health, 5, 15,
//!             Stat::new(StatType::Speed, 10.0))
//!     })
//!     .collect();
//! let pool = ItemPool::from_mods(mods).unwrap();
//!
//! let plan = OptimizationPlan::new(PlanMode::Advanced)
//!     .with_weight(StatAxis::Speed, 100.0);
//! let base = BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 1.0, 130.0, 200.0, 100.0);
//! let character = Character::new("Vanguard", base, plan);
//!
//! let result = Scheduler::new(&data).optimize(&[character], pool).unwrap();
//! let assignment = result.outcomes[0].assignment().unwrap();
//! assert_eq!(assignment.mods().len(), 6);
//! assert_eq!(assignment.value, 6000.0); // six mods x 10 speed x weight 100
//! ```
//!
//! ## Modules
//!
//! - [`stat`] - Stat axes, concrete stat lines, and stat-set snapshots
//! - [`plan`] - Optimization plans (weight vectors with basic/advanced modes)
//! - [`character`] - Character profiles and base stats
//! - [`item`] - Mods, slots, and set families
//! - [`gamedata`] - Collaborator-supplied game constants
//! - [`value`] - The pure value function
//! - [`pool`] - The shared, shrinking item pool
//! - [`search`] - The per-character search engine
//! - [`scheduler`] - The run driver with cancellation
//! - [`error`] - Error types

pub mod character;
pub mod error;
pub mod gamedata;
pub mod item;
pub mod plan;
pub mod pool;
pub mod scheduler;
pub mod search;
pub mod stat;
pub mod value;

// Re-export main types for convenience
pub use character::{BaseStats, Character, PlanSelection};
pub use error::OptimizeError;
pub use gamedata::{GameData, SetBonus};
pub use item::{Mod, ModId, Secondary, SetType, Slot};
pub use plan::{OptimizationPlan, PlanMode};
pub use pool::ItemPool;
pub use scheduler::{CancelToken, CharacterOutcome, RunResult, Scheduler};
pub use search::{Assignment, SearchEngine};
pub use stat::{Stat, StatAxis, StatSet, StatType};

// Re-export the value function for callers scoring outside a search
pub use value::{score_assignment, score_mod, score_stat_set};
