//! Pool league web app: library with models, storage and business logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::Config;
pub use logic::{
    apply_match_result, create_match, create_player, delete_match, delete_player, get_match,
    head_to_head, list_matches, list_players, next_event, player_profile, replace_next_event,
    revert_match_result, update_match, update_player, PlayerProfile,
};
pub use models::{
    ErrorKind, LeagueError, Match, MatchDetails, MatchId, MatchScore, NextEvent, NextEventDraft,
    Player, PlayerDraft, PlayerId, PlayerIdentity, PlayerStats, Side,
};
pub use store::{LeagueStore, MatchFilter, MemoryStore, Transaction, Write};
