//! Match, its recorded details, and the statistical view used by reconciliation.

use crate::models::error::LeagueError;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One side of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    One,
    Two,
}

/// Everything a client sends for a match (create, or full replace on update).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub tournament_name: String,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// Display name of player one ("last first"); rewritten from the player record on save.
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "created_at", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_racks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_racks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_place: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_place: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_ranking_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_ranking_points: Option<f64>,
    /// Informational; reconciliation does not look at it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ranking_event: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_walkover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_walkover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player1_female: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player2_female: Option<bool>,
}

/// A stored match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(flatten)]
    pub details: MatchDetails,
}

/// The fields of a match that feed player statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MatchScore {
    pub player1_racks: Option<u32>,
    pub player2_racks: Option<u32>,
    pub player1_place: Option<u32>,
    pub player2_place: Option<u32>,
    pub player1_ranking_points: Option<f64>,
    pub player2_ranking_points: Option<f64>,
    pub player1_walkover: bool,
    pub player2_walkover: bool,
}

impl MatchScore {
    /// Player one wins on a higher rack count or a walkover; every other case goes to player two,
    /// including a match with no racks recorded at all.
    pub fn winner(&self) -> Side {
        let more_racks = matches!(
            (self.player1_racks, self.player2_racks),
            (Some(one), Some(two)) if one > two
        );
        if more_racks || self.player1_walkover {
            Side::One
        } else {
            Side::Two
        }
    }

    /// Rack counts, when they are meaningful: both recorded and non-zero, or either explicitly 0.
    /// A count that was not recorded contributes 0.
    pub fn racks(&self) -> Option<(u32, u32)> {
        match (self.player1_racks, self.player2_racks) {
            (Some(one), Some(two)) if one > 0 && two > 0 => Some((one, two)),
            (one, two) if one == Some(0) || two == Some(0) => {
                Some((one.unwrap_or(0), two.unwrap_or(0)))
            }
            _ => None,
        }
    }

    /// Placement recorded for `side`, if any (0 counts as not recorded).
    pub fn place(&self, side: Side) -> Option<u32> {
        match side {
            Side::One => self.player1_place,
            Side::Two => self.player2_place,
        }
        .filter(|&place| place > 0)
    }

    /// Ranking points awarded to `side`, if any (0 counts as not awarded).
    pub fn ranking_points(&self, side: Side) -> Option<f64> {
        match side {
            Side::One => self.player1_ranking_points,
            Side::Two => self.player2_ranking_points,
        }
        .filter(|&points| points != 0.0)
    }
}

impl MatchDetails {
    pub fn score(&self) -> MatchScore {
        MatchScore {
            player1_racks: self.player1_racks,
            player2_racks: self.player2_racks,
            player1_place: self.player1_place,
            player2_place: self.player2_place,
            player1_ranking_points: self.player1_ranking_points,
            player2_ranking_points: self.player2_ranking_points,
            player1_walkover: self.player1_walkover.unwrap_or(false),
            player2_walkover: self.player2_walkover.unwrap_or(false),
        }
    }

    pub fn player_id(&self, side: Side) -> PlayerId {
        match side {
            Side::One => self.player1_id,
            Side::Two => self.player2_id,
        }
    }

    /// Which side `player` played on, if any.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.player1_id == player {
            Some(Side::One)
        } else if self.player2_id == player {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// Copy the player's display name and sex flag onto `side`.
    pub fn sync_identity(&mut self, side: Side, player: &Player) {
        match side {
            Side::One => {
                self.player1 = player.display_name();
                self.is_player1_female = Some(player.is_female);
            }
            Side::Two => {
                self.player2 = player.display_name();
                self.is_player2_female = Some(player.is_female);
            }
        }
    }

    /// Reject bodies that cannot be reconciled.
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.tournament_name.trim().is_empty() {
            return Err(LeagueError::Validation("tournamentName must not be empty".into()));
        }
        if self.player1_id == self.player2_id {
            return Err(LeagueError::Validation("a player cannot play against themselves".into()));
        }
        if self.player1_place == Some(0) || self.player2_place == Some(0) {
            return Err(LeagueError::Validation("placements start at 1".into()));
        }
        let bad_points = |points: Option<f64>| points.is_some_and(|p| !p.is_finite() || p < 0.0);
        if bad_points(self.player1_ranking_points) || bad_points(self.player2_ranking_points) {
            return Err(LeagueError::Validation(
                "ranking points must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

impl Match {
    pub fn new(details: MatchDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            details,
        }
    }

    pub fn score(&self) -> MatchScore {
        self.details.score()
    }
}
