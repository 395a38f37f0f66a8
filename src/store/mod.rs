//! Persistence seam: the document store the league logic reads from and commits to.
//!
//! Reads are plain lookups and filtered scans. Every mutation goes through [`LeagueStore::commit`]
//! as a [`Transaction`]: an ordered write set that lands completely or not at all.

mod memory;

pub use memory::MemoryStore;

use crate::logic::best_placement_in;
use crate::models::{LeagueError, Match, MatchId, NextEvent, Player, PlayerId};
use async_trait::async_trait;

/// Which matches a scan returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchFilter {
    All,
    /// Matches the player took part in, on either side.
    Player(PlayerId),
    /// Matches between the two players, in either orientation.
    Between(PlayerId, PlayerId),
}

impl MatchFilter {
    pub fn accepts(&self, m: &Match) -> bool {
        let d = &m.details;
        match *self {
            MatchFilter::All => true,
            MatchFilter::Player(id) => d.player1_id == id || d.player2_id == id,
            MatchFilter::Between(a, b) => {
                (d.player1_id == a && d.player2_id == b) || (d.player1_id == b && d.player2_id == a)
            }
        }
    }
}

/// A single document write inside a transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    InsertMatch(Match),
    ReplaceMatch(Match),
    DeleteMatch(MatchId),
    InsertPlayer(Player),
    /// Fails with [`LeagueError::StaleRecord`] unless `version` still matches the stored player.
    ReplacePlayer(Player),
    DeletePlayer(PlayerId),
    ReplaceNextEvent(NextEvent),
}

/// Ordered write set committed atomically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    writes: Vec<Write>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, write: Write) -> &mut Self {
        self.writes.push(write);
        self
    }

    pub fn insert_match(&mut self, m: Match) -> &mut Self {
        self.push(Write::InsertMatch(m))
    }

    pub fn replace_match(&mut self, m: Match) -> &mut Self {
        self.push(Write::ReplaceMatch(m))
    }

    pub fn delete_match(&mut self, id: MatchId) -> &mut Self {
        self.push(Write::DeleteMatch(id))
    }

    pub fn insert_player(&mut self, player: Player) -> &mut Self {
        self.push(Write::InsertPlayer(player))
    }

    pub fn replace_player(&mut self, player: Player) -> &mut Self {
        self.push(Write::ReplacePlayer(player))
    }

    pub fn delete_player(&mut self, id: PlayerId) -> &mut Self {
        self.push(Write::DeletePlayer(id))
    }

    pub fn replace_next_event(&mut self, event: NextEvent) -> &mut Self {
        self.push(Write::ReplaceNextEvent(event))
    }

    pub fn into_writes(self) -> Vec<Write> {
        self.writes
    }
}

/// Document store for players, matches and the next event.
#[async_trait]
pub trait LeagueStore: Send + Sync {
    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>, LeagueError>;

    async fn list_players(&self) -> Result<Vec<Player>, LeagueError>;

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, LeagueError>;

    async fn find_matches(&self, filter: MatchFilter) -> Result<Vec<Match>, LeagueError>;

    async fn next_event(&self) -> Result<Option<NextEvent>, LeagueError>;

    /// Apply every write of `tx` or none of them.
    async fn commit(&self, tx: Transaction) -> Result<(), LeagueError>;

    /// Best (lowest) placement `player` holds in any match other than `excluding`.
    ///
    /// The default scans the player's matches; stores with a placement index should override it.
    async fn best_placement(
        &self,
        player: PlayerId,
        excluding: MatchId,
    ) -> Result<Option<u32>, LeagueError> {
        let history = self.find_matches(MatchFilter::Player(player)).await?;
        Ok(best_placement_in(&history, player, excluding))
    }
}
