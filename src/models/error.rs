//! Errors surfaced by league operations.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use thiserror::Error;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LeagueError {
    /// A referenced player id does not resolve.
    #[error("Could not find player for the provided id")]
    PlayerNotFound(PlayerId),
    /// A referenced match id does not resolve.
    #[error("Could not find match for the provided id")]
    MatchNotFound(MatchId),
    /// Required fields missing or out of range.
    #[error("Invalid inputs passed: {0}")]
    Validation(String),
    /// First and last name are unique (case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    /// The player changed between our read and our commit.
    #[error("Player was modified by another request, please try again")]
    StaleRecord(PlayerId),
    /// Store read, write or transaction failure.
    #[error("Something went wrong in the store: {0}")]
    Persistence(String),
}

/// Coarse classification, used to pick an HTTP status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    Conflict,
    PersistenceFailed,
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::PlayerNotFound(_) | LeagueError::MatchNotFound(_) => ErrorKind::NotFound,
            LeagueError::Validation(_) => ErrorKind::ValidationFailed,
            LeagueError::DuplicatePlayerName | LeagueError::StaleRecord(_) => ErrorKind::Conflict,
            LeagueError::Persistence(_) => ErrorKind::PersistenceFailed,
        }
    }
}
