//! Data structures for the league: players, matches, the next event, errors.

mod error;
mod game;
mod next_event;
mod player;

pub use error::{ErrorKind, LeagueError};
pub use game::{Match, MatchDetails, MatchId, MatchScore, Side};
pub use next_event::{NextEvent, NextEventDraft};
pub use player::{Player, PlayerDraft, PlayerId, PlayerIdentity, PlayerStats};
