//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use pool_league_web::{
    create_player, MatchDetails, MemoryStore, Player, PlayerDraft, PlayerStats,
};

/// An evening in May 2024.
pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, 19, 0, 0).unwrap()
}

/// A match between `one` and `two` with nothing recorded beyond the players.
pub fn details(one: &Player, two: &Player) -> MatchDetails {
    MatchDetails {
        tournament_name: "Thursday 9-ball".into(),
        player1_id: one.id,
        player2_id: two.id,
        player1: String::new(),
        player2: String::new(),
        date: day(1),
        created_at: day(1),
        stage: None,
        player1_racks: None,
        player2_racks: None,
        player1_place: None,
        player2_place: None,
        player1_ranking_points: None,
        player2_ranking_points: None,
        is_ranking_event: None,
        player1_walkover: None,
        player2_walkover: None,
        is_player1_female: None,
        is_player2_female: None,
    }
}

pub fn with_racks(mut d: MatchDetails, one: u32, two: u32) -> MatchDetails {
    d.player1_racks = Some(one);
    d.player2_racks = Some(two);
    d
}

pub fn draft(first: &str, last: &str) -> PlayerDraft {
    PlayerDraft {
        first_name: first.into(),
        last_name: last.into(),
        is_female: false,
        stats: PlayerStats::default(),
    }
}

pub async fn seed_player(store: &MemoryStore, first: &str, last: &str) -> Player {
    create_player(store, draft(first, last)).await.unwrap()
}
