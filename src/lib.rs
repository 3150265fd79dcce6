//! Pokemon RPG battle core
//!
//! Wild battles between the player's party and a single wild Pokemon: stat
//! and damage calculation, status conditions, move effects and a menu-driven
//! turn state machine. A [`BattleRunner`] drives the state machine from an
//! input channel and paces its events for a presenter.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod conditions;
pub mod config;
pub mod dex;
pub mod encounter;
pub mod errors;
pub mod moves;
pub mod party;
pub mod pokemon;
pub mod species;

// --- PUBLIC API RE-EXPORTS ---

// Static data definitions from the `schema` crate.
pub use schema::{
    BaseStats, ConditionId, MoveCategory, MoveData, MoveEffects, MoveTarget, PokemonType,
    SecondaryEffect, Stat, StatBoost,
};

// Battle state machine and its driver.
pub use battle::rng::BattleRng;
pub use battle::runner::{BattleOutcome, BattleRunner, Presenter};
pub use battle::state::{
    ActionChoice, Animation, BattleEvent, BattleState, Menu, MenuInput, PartyScreenReason, Side,
};
pub use battle::system::BattleSystem;

// Runtime types.
pub use conditions::{BattleContext, ConditionRegistry};
pub use config::{BattleConfig, TimingConfig};
pub use dex::Dex;
pub use encounter::MapArea;
pub use moves::MoveInstance;
pub use party::Party;
pub use pokemon::{DamageDetails, Pokemon};
pub use species::Species;

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, DataError, DataResult, PartyError, RunnerError,
    SelectionError,
};
