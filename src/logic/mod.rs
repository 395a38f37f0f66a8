//! League business logic: statistics reconciliation, match and player operations, next event.

mod events;
mod matches;
mod players;
mod stats;

pub use events::{next_event, replace_next_event};
pub use matches::{
    create_match, delete_match, get_match, head_to_head, list_matches, sort_newest_first,
    update_match,
};
pub use players::{
    create_player, delete_player, list_players, player_profile, update_player, PlayerProfile,
};
pub use stats::{apply_match_result, best_placement_in, revert_match_result};
