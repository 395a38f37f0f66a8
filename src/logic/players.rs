//! Player management: create, edit (with propagation onto matches), delete, listing.

use crate::logic::matches::sort_newest_first;
use crate::models::{LeagueError, Match, Player, PlayerDraft, PlayerId, PlayerIdentity};
use crate::store::{LeagueStore, MatchFilter, Transaction};
use serde::Serialize;

/// A player together with every match they played, newest first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub matches: Vec<Match>,
}

fn validate_names(first_name: &str, last_name: &str) -> Result<(), LeagueError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(LeagueError::Validation(
            "firstName and lastName must not be empty".into(),
        ));
    }
    Ok(())
}

/// Add a player. Names are unique (case-insensitive); seeded statistics are taken as given,
/// except that zero ranking points are stored as none.
pub async fn create_player<S>(store: &S, draft: PlayerDraft) -> Result<Player, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    validate_names(&draft.first_name, &draft.last_name)?;
    if draft.stats.highest_place == Some(0) {
        return Err(LeagueError::Validation("placements start at 1".into()));
    }
    if draft
        .stats
        .ranking_points
        .is_some_and(|p| !p.is_finite() || p < 0.0)
    {
        return Err(LeagueError::Validation(
            "ranking points must be a non-negative number".into(),
        ));
    }

    let mut player = Player::from_draft(draft);
    player.stats.ranking_points = player.stats.ranking_points.filter(|&p| p > 0.0);

    let mut tx = Transaction::new();
    tx.insert_player(player.clone());
    store.commit(tx).await?;

    log::info!("Created player {} ({})", player.id, player.display_name());
    Ok(player)
}

/// Change a player's name or sex and rewrite the copies of both on every match they played,
/// all in one transaction.
pub async fn update_player<S>(store: &S, id: PlayerId, identity: PlayerIdentity) -> Result<Player, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    validate_names(&identity.first_name, &identity.last_name)?;
    let mut player = store
        .find_player(id)
        .await?
        .ok_or(LeagueError::PlayerNotFound(id))?;
    player.set_identity(identity);

    let mut tx = Transaction::new();
    tx.replace_player(player.clone());
    let mut rewritten = 0;
    for mut m in store.find_matches(MatchFilter::Player(id)).await? {
        let Some(side) = m.details.side_of(id) else {
            continue;
        };
        m.details.sync_identity(side, &player);
        tx.replace_match(m);
        rewritten += 1;
    }
    store.commit(tx).await?;

    log::info!(
        "Updated player {} ({}), rewrote {} match(es)",
        id,
        player.display_name(),
        rewritten
    );
    Ok(player)
}

/// Remove a player. Their matches are kept as they are.
pub async fn delete_player<S>(store: &S, id: PlayerId) -> Result<(), LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let mut tx = Transaction::new();
    tx.delete_player(id);
    store.commit(tx).await?;
    log::info!("Deleted player {}", id);
    Ok(())
}

/// All players, by last name then first name.
pub async fn list_players<S>(store: &S) -> Result<Vec<Player>, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let mut players = store.list_players().await?;
    players.sort_by_cached_key(|p| (p.last_name.to_lowercase(), p.first_name.to_lowercase()));
    Ok(players)
}

pub async fn player_profile<S>(store: &S, id: PlayerId) -> Result<PlayerProfile, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let player = store
        .find_player(id)
        .await?
        .ok_or(LeagueError::PlayerNotFound(id))?;
    let mut matches = store.find_matches(MatchFilter::Player(id)).await?;
    sort_newest_first(&mut matches);
    Ok(PlayerProfile { player, matches })
}
