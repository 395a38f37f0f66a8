//! Match create, update and delete: each loads the players involved, reconciles their
//! statistics and commits the match together with the players in one transaction.

use crate::logic::stats::{apply_match_result, revert_match_result};
use crate::models::{LeagueError, Match, MatchDetails, MatchId, Player, PlayerId, Side};
use crate::store::{LeagueStore, MatchFilter, Transaction};
use std::collections::HashMap;

async fn load_player<S>(store: &S, id: PlayerId) -> Result<Player, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    store
        .find_player(id)
        .await?
        .ok_or(LeagueError::PlayerNotFound(id))
}

async fn load_match<S>(store: &S, id: MatchId) -> Result<Match, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    store
        .find_match(id)
        .await?
        .ok_or(LeagueError::MatchNotFound(id))
}

async fn load_match_players<S>(store: &S, details: &MatchDetails) -> Result<(Player, Player), LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let one = load_player(store, details.player1_id).await?;
    let two = load_player(store, details.player2_id).await?;
    Ok((one, two))
}

/// Take an already loaded (and possibly already adjusted) player, or load it.
async fn take_player<S>(
    store: &S,
    loaded: &mut HashMap<PlayerId, Player>,
    id: PlayerId,
) -> Result<Player, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    match loaded.remove(&id) {
        Some(player) => Ok(player),
        None => load_player(store, id).await,
    }
}

/// Newest first: by date, then by creation time.
pub fn sort_newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.details
            .date
            .cmp(&a.details.date)
            .then_with(|| b.details.created_at.cmp(&a.details.created_at))
    });
}

/// Record a new match and credit it to both players.
pub async fn create_match<S>(store: &S, mut details: MatchDetails) -> Result<Match, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    details.validate()?;
    let (mut one, mut two) = load_match_players(store, &details).await?;
    details.sync_identity(Side::One, &one);
    details.sync_identity(Side::Two, &two);

    let created = Match::new(details);
    apply_match_result(&mut one, &mut two, &created.score())?;

    let mut tx = Transaction::new();
    tx.insert_match(created.clone())
        .replace_player(one)
        .replace_player(two);
    store.commit(tx).await?;

    log::info!(
        "Created match {} ({}: {} vs {})",
        created.id,
        created.details.tournament_name,
        created.details.player1,
        created.details.player2
    );
    Ok(created)
}

/// Remove a match and take it back out of both players' statistics.
pub async fn delete_match<S>(store: &S, id: MatchId) -> Result<(), LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let existing = load_match(store, id).await?;
    let (mut one, mut two) = load_match_players(store, &existing.details).await?;
    revert_match_result(&mut one, &mut two, &existing.score(), id, store).await?;

    let mut tx = Transaction::new();
    tx.delete_match(id).replace_player(one).replace_player(two);
    store.commit(tx).await?;

    log::info!("Deleted match {}", id);
    Ok(())
}

/// Replace every field of a match.
///
/// The stored result is reverted from its players, then the new result is applied. When the
/// new details name different players, the old ones keep only the revert and the new ones get
/// the apply; all of them are written in the same transaction.
pub async fn update_match<S>(store: &S, id: MatchId, mut details: MatchDetails) -> Result<Match, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    details.validate()?;
    let existing = load_match(store, id).await?;
    let (mut old_one, mut old_two) = load_match_players(store, &existing.details).await?;
    revert_match_result(&mut old_one, &mut old_two, &existing.score(), id, store).await?;

    let mut touched = HashMap::from([(old_one.id, old_one), (old_two.id, old_two)]);
    let mut one = take_player(store, &mut touched, details.player1_id).await?;
    let mut two = take_player(store, &mut touched, details.player2_id).await?;
    details.sync_identity(Side::One, &one);
    details.sync_identity(Side::Two, &two);

    let updated = Match { id, details };
    apply_match_result(&mut one, &mut two, &updated.score())?;
    touched.insert(one.id, one);
    touched.insert(two.id, two);

    let mut tx = Transaction::new();
    tx.replace_match(updated.clone());
    for player in touched.into_values() {
        tx.replace_player(player);
    }
    store.commit(tx).await?;

    log::info!("Updated match {}", id);
    Ok(updated)
}

pub async fn get_match<S>(store: &S, id: MatchId) -> Result<Match, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    load_match(store, id).await
}

/// All matches, newest first.
pub async fn list_matches<S>(store: &S) -> Result<Vec<Match>, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let mut matches = store.find_matches(MatchFilter::All).await?;
    sort_newest_first(&mut matches);
    Ok(matches)
}

/// Matches between two players in either orientation, newest first.
pub async fn head_to_head<S>(store: &S, a: PlayerId, b: PlayerId) -> Result<Vec<Match>, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let mut matches = store.find_matches(MatchFilter::Between(a, b)).await?;
    sort_newest_first(&mut matches);
    Ok(matches)
}
