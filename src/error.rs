//! Centralized error types for the simulation.
//!
//! Only startup (level loading, configuration, logging) can fail. Movement requests that cannot
//! be honoured are silent no-ops and never surface here.

use std::io;

use glam::IVec2;

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level format error: {0}")]
    LevelFormat(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Error type for level parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Level is empty")]
    EmptyLevel,

    #[error("Level has no player spawn ('P')")]
    MissingPlayerSpawn,

    #[error("Level has more than one player spawn: {first} and {second}")]
    MultiplePlayerSpawns { first: IVec2, second: IVec2 },

    #[error("Unknown character {character:?} at row {row}, column {col}")]
    UnknownCharacter { character: char, row: usize, col: usize },
}

impl From<figment::Error> for GameError {
    fn from(error: figment::Error) -> Self {
        GameError::Config(Box::new(error))
    }
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
