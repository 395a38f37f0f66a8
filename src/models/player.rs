//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Aggregate statistics of a player, derived from the match history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub total_matches: u32,
    #[serde(default)]
    pub matches_won: u32,
    /// Racks played by both sides, over matches with recorded rack counts.
    #[serde(default)]
    pub total_racks: u32,
    #[serde(default)]
    pub racks_won: u32,
    /// Best (lowest) tournament placement ever recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_place: Option<u32>,
    /// Never `Some(0.0)`: points that fall back to zero are cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_points: Option<f64>,
}

/// A league player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub is_female: bool,
    #[serde(flatten)]
    pub stats: PlayerStats,
    /// Bumped by the store on every committed replace; used to detect lost updates.
    #[serde(skip)]
    pub version: u64,
}

/// Body for creating a player. Statistics may be seeded, e.g. when migrating an existing league.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub first_name: String,
    pub last_name: String,
    pub is_female: bool,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// Identity fields of a player; these are copied onto every match the player appears in.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub first_name: String,
    pub last_name: String,
    pub is_female: bool,
}

impl Player {
    /// Create a new player with the given identity and zeroed statistics.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, is_female: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_female,
            stats: PlayerStats::default(),
            version: 0,
        }
    }

    pub fn from_draft(draft: PlayerDraft) -> Self {
        Self {
            stats: draft.stats,
            ..Self::new(draft.first_name.trim(), draft.last_name.trim(), draft.is_female)
        }
    }

    /// Name as shown on matches: "last first".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Whether both players carry the same name (trimmed, case-insensitive).
    pub fn same_name_as(&self, other: &Player) -> bool {
        self.first_name.trim().eq_ignore_ascii_case(other.first_name.trim())
            && self.last_name.trim().eq_ignore_ascii_case(other.last_name.trim())
    }

    pub fn set_identity(&mut self, identity: PlayerIdentity) {
        self.first_name = identity.first_name.trim().to_string();
        self.last_name = identity.last_name.trim().to_string();
        self.is_female = identity.is_female;
    }
}
