//! In-process store: collections behind one lock, with a placement index.

use crate::models::{LeagueError, Match, MatchId, NextEvent, Player, PlayerId, Side};
use crate::store::{LeagueStore, MatchFilter, Transaction, Write};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// How to put a collection back after a partially applied transaction.
enum Undo {
    Player(PlayerId, Option<Player>),
    Match(MatchId, Option<Match>),
    NextEvent(Option<NextEvent>),
}

#[derive(Default)]
struct Collections {
    players: HashMap<PlayerId, Player>,
    matches: HashMap<MatchId, Match>,
    /// (player, placement, match) for every recorded placement, on either side.
    placements: BTreeSet<(PlayerId, u32, MatchId)>,
    next_event: Option<NextEvent>,
}

impl Collections {
    fn index_entries(m: &Match) -> impl Iterator<Item = (PlayerId, u32, MatchId)> + '_ {
        let score = m.score();
        [Side::One, Side::Two].into_iter().filter_map(move |side| {
            score
                .place(side)
                .map(|place| (m.details.player_id(side), place, m.id))
        })
    }

    /// Set (or remove) a match, keeping the placement index in step. Returns the previous match.
    fn put_match(&mut self, id: MatchId, m: Option<Match>) -> Option<Match> {
        let previous = match m {
            Some(m) => {
                for entry in Self::index_entries(&m) {
                    self.placements.insert(entry);
                }
                self.matches.insert(id, m)
            }
            None => self.matches.remove(&id),
        };
        if let Some(old) = &previous {
            let current = self.matches.get(&id);
            for entry in Self::index_entries(old) {
                let still_indexed = current
                    .map(|m| Self::index_entries(m).any(|e| e == entry))
                    .unwrap_or(false);
                if !still_indexed {
                    self.placements.remove(&entry);
                }
            }
        }
        previous
    }

    fn put_player(&mut self, id: PlayerId, player: Option<Player>) -> Option<Player> {
        match player {
            Some(p) => self.players.insert(id, p),
            None => self.players.remove(&id),
        }
    }

    fn ensure_unique_name(&self, player: &Player) -> Result<(), LeagueError> {
        let taken = self
            .players
            .values()
            .any(|other| other.id != player.id && other.same_name_as(player));
        if taken {
            return Err(LeagueError::DuplicatePlayerName);
        }
        Ok(())
    }

    fn apply(&mut self, write: Write) -> Result<Undo, LeagueError> {
        match write {
            Write::InsertMatch(m) => {
                if self.matches.contains_key(&m.id) {
                    return Err(LeagueError::Persistence(format!("match {} already exists", m.id)));
                }
                let id = m.id;
                Ok(Undo::Match(id, self.put_match(id, Some(m))))
            }
            Write::ReplaceMatch(m) => {
                if !self.matches.contains_key(&m.id) {
                    return Err(LeagueError::MatchNotFound(m.id));
                }
                let id = m.id;
                Ok(Undo::Match(id, self.put_match(id, Some(m))))
            }
            Write::DeleteMatch(id) => {
                if !self.matches.contains_key(&id) {
                    return Err(LeagueError::MatchNotFound(id));
                }
                Ok(Undo::Match(id, self.put_match(id, None)))
            }
            Write::InsertPlayer(p) => {
                if self.players.contains_key(&p.id) {
                    return Err(LeagueError::Persistence(format!("player {} already exists", p.id)));
                }
                self.ensure_unique_name(&p)?;
                let id = p.id;
                Ok(Undo::Player(id, self.put_player(id, Some(p))))
            }
            Write::ReplacePlayer(mut p) => {
                let stored = self
                    .players
                    .get(&p.id)
                    .ok_or(LeagueError::PlayerNotFound(p.id))?;
                if stored.version != p.version {
                    return Err(LeagueError::StaleRecord(p.id));
                }
                self.ensure_unique_name(&p)?;
                p.version += 1;
                let id = p.id;
                Ok(Undo::Player(id, self.put_player(id, Some(p))))
            }
            Write::DeletePlayer(id) => {
                if !self.players.contains_key(&id) {
                    return Err(LeagueError::PlayerNotFound(id));
                }
                Ok(Undo::Player(id, self.put_player(id, None)))
            }
            Write::ReplaceNextEvent(event) => {
                Ok(Undo::NextEvent(self.next_event.replace(event)))
            }
        }
    }

    fn restore(&mut self, undo: Undo) {
        match undo {
            Undo::Player(id, previous) => {
                self.put_player(id, previous);
            }
            Undo::Match(id, previous) => {
                self.put_match(id, previous);
            }
            Undo::NextEvent(previous) => self.next_event = previous,
        }
    }
}

/// Store keeping every collection in memory. All collections share one lock, so a commit is
/// atomic with respect to every reader.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, LeagueError> {
        self.inner
            .read()
            .map_err(|_| LeagueError::Persistence("lock error".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, LeagueError> {
        self.inner
            .write()
            .map_err(|_| LeagueError::Persistence("lock error".into()))
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>, LeagueError> {
        Ok(self.read()?.players.get(&id).cloned())
    }

    async fn list_players(&self) -> Result<Vec<Player>, LeagueError> {
        Ok(self.read()?.players.values().cloned().collect())
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, LeagueError> {
        Ok(self.read()?.matches.get(&id).cloned())
    }

    async fn find_matches(&self, filter: MatchFilter) -> Result<Vec<Match>, LeagueError> {
        Ok(self
            .read()?
            .matches
            .values()
            .filter(|m| filter.accepts(m))
            .cloned()
            .collect())
    }

    async fn next_event(&self) -> Result<Option<NextEvent>, LeagueError> {
        Ok(self.read()?.next_event.clone())
    }

    async fn commit(&self, tx: Transaction) -> Result<(), LeagueError> {
        let mut guard = self.write()?;
        let writes = tx.into_writes();
        let mut undo = Vec::with_capacity(writes.len());
        for write in writes {
            match guard.apply(write) {
                Ok(step) => undo.push(step),
                Err(e) => {
                    for step in undo.into_iter().rev() {
                        guard.restore(step);
                    }
                    log::warn!("Transaction rolled back: {}", e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn best_placement(
        &self,
        player: PlayerId,
        excluding: MatchId,
    ) -> Result<Option<u32>, LeagueError> {
        let guard = self.read()?;
        let best = guard
            .placements
            .range((player, 0, Uuid::nil())..)
            .take_while(|(p, _, _)| *p == player)
            .find(|(_, _, match_id)| *match_id != excluding)
            .map(|(_, place, _)| *place);
        Ok(best)
    }
}
