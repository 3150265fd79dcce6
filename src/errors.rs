use std::io;
use thiserror::Error;

/// Main error type for the battle core
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to loading or resolving static data
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    /// The player's party can't be used to start or continue a battle
    #[error("Party error: {0}")]
    Party(#[from] PartyError),
    /// The async runner lost its input source
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
}

/// Errors related to the species and move tables
#[derive(Debug, Error)]
pub enum DataError {
    /// A species learnset or lookup referenced a move that isn't in the table
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    /// A lookup referenced a species that isn't in the table
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    /// Two entries of the same table share a name
    #[error("Duplicate {kind} entry: {name}")]
    Duplicate { kind: &'static str, name: String },
    /// The RON text could not be parsed
    #[error("Malformed data in {source_name}: {error}")]
    Parse {
        source_name: String,
        error: ron::error::SpannedError,
    },
    /// A map area with nothing to encounter
    #[error("Map area {0} has no wild Pokemon")]
    EmptyEncounterTable(String),
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: io::Error },
}

/// Errors related to party construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartyError {
    #[error("A party needs at least one Pokemon")]
    Empty,
    #[error("A party holds at most {max} Pokemon, got {got}")]
    TooLarge { max: usize, got: usize },
    #[error("No Pokemon in the party is able to battle")]
    NoHealthyPokemon,
}

/// Rejected menu confirmations. The display text is what the player sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("You can't send out a fainted pokemon")]
    FaintedPokemon,
    #[error("You can't switch with the same pokemon")]
    AlreadyActive,
    #[error("You have to choose a pokemon to continue")]
    SwitchRequired,
    #[error("There's no pokemon in slot {0}")]
    InvalidPokemonIndex(usize),
    #[error("There's no move in slot {0}")]
    InvalidMoveIndex(usize),
    #[error("{0} has no PP left")]
    NoPpRemaining(String),
    #[error("That can't be chosen right now")]
    NotAccepting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("Input channel closed before the battle ended")]
    InputClosed,
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
