//! Player statistics reconciliation: apply a match result, revert it, and re-derive the best
//! placement from history when the reverted match held the record.

use crate::models::{LeagueError, Match, MatchId, MatchScore, Player, PlayerId, Side};
use crate::store::LeagueStore;

/// Point balances within this distance of zero are treated as zero.
const POINTS_EPSILON: f64 = 1e-9;

fn side_mut<'a>(one: &'a mut Player, two: &'a mut Player, side: Side) -> &'a mut Player {
    match side {
        Side::One => one,
        Side::Two => two,
    }
}

/// Subtract, stopping at zero. History and aggregates disagree if this ever saturates.
fn deduct(counter: &mut u32, amount: u32, player: PlayerId, field: &str) {
    match counter.checked_sub(amount) {
        Some(rest) => *counter = rest,
        None => {
            log::warn!(
                "Player {} has {} {} but {} would be removed; clamping to 0",
                player,
                counter,
                field,
                amount
            );
            *counter = 0;
        }
    }
}

fn deduct_points(player: &mut Player, points: f64) {
    match player.stats.ranking_points {
        Some(current) => {
            let rest = current - points;
            if rest < -POINTS_EPSILON {
                log::warn!(
                    "Player {} has {} ranking points but {} would be removed",
                    player.id,
                    current,
                    points
                );
            }
            player.stats.ranking_points = (rest > POINTS_EPSILON).then_some(rest);
        }
        None => log::warn!(
            "Player {} has no ranking points to remove {} from",
            player.id,
            points
        ),
    }
}

/// Add to a counter, refusing a total that no longer fits.
fn credit(counter: u32, amount: u32, player: PlayerId, field: &str) -> Result<u32, LeagueError> {
    counter.checked_add(amount).ok_or_else(|| {
        LeagueError::Validation(format!(
            "{} of player {} would exceed {} by adding {}",
            field,
            player,
            u32::MAX,
            amount
        ))
    })
}

/// Record a match result on both players.
///
/// 1. Both players get one more match; the winner (see [`MatchScore::winner`]) one more win.
/// 2. When rack counts are meaningful, both players' rack totals grow by the racks played and
///    each player's racks won by their own count.
/// 3. Non-zero ranking points are added, starting from nothing if the player had none.
/// 4. A placement better than the player's best (or a first placement) becomes the new best.
///
/// Fails with [`LeagueError::Validation`] when a counter would overflow; neither player is
/// changed in that case.
pub fn apply_match_result(
    one: &mut Player,
    two: &mut Player,
    score: &MatchScore,
) -> Result<(), LeagueError> {
    let mut next_one = one.stats.clone();
    let mut next_two = two.stats.clone();

    next_one.total_matches = credit(next_one.total_matches, 1, one.id, "totalMatches")?;
    next_two.total_matches = credit(next_two.total_matches, 1, two.id, "totalMatches")?;
    match score.winner() {
        Side::One => next_one.matches_won = credit(next_one.matches_won, 1, one.id, "matchesWon")?,
        Side::Two => next_two.matches_won = credit(next_two.matches_won, 1, two.id, "matchesWon")?,
    }

    if let Some((racks_one, racks_two)) = score.racks() {
        let played = credit(racks_one, racks_two, one.id, "racks played")?;
        next_one.total_racks = credit(next_one.total_racks, played, one.id, "totalRacks")?;
        next_two.total_racks = credit(next_two.total_racks, played, two.id, "totalRacks")?;
        next_one.racks_won = credit(next_one.racks_won, racks_one, one.id, "racksWon")?;
        next_two.racks_won = credit(next_two.racks_won, racks_two, two.id, "racksWon")?;
    }

    for (side, stats) in [(Side::One, &mut next_one), (Side::Two, &mut next_two)] {
        if let Some(points) = score.ranking_points(side) {
            stats.ranking_points = Some(stats.ranking_points.unwrap_or(0.0) + points);
        }
        if let Some(place) = score.place(side) {
            if stats.highest_place.map_or(true, |best| place < best) {
                stats.highest_place = Some(place);
            }
        }
    }

    one.stats = next_one;
    two.stats = next_two;
    Ok(())
}

/// Undo [`apply_match_result`] for a match that is being deleted or replaced.
///
/// Counters and ranking points are subtracted; points that reach zero are cleared rather than
/// stored as zero. When the match carried a player's best placement, the best placement is
/// re-derived from every other match in `store`.
pub async fn revert_match_result<S>(
    one: &mut Player,
    two: &mut Player,
    score: &MatchScore,
    match_id: MatchId,
    store: &S,
) -> Result<(), LeagueError>
where
    S: LeagueStore + ?Sized,
{
    for player in [&mut *one, &mut *two] {
        deduct(&mut player.stats.total_matches, 1, player.id, "totalMatches");
    }
    let winner = side_mut(one, two, score.winner());
    deduct(&mut winner.stats.matches_won, 1, winner.id, "matchesWon");

    if let Some((racks_one, racks_two)) = score.racks() {
        let played = racks_one.saturating_add(racks_two);
        for player in [&mut *one, &mut *two] {
            deduct(&mut player.stats.total_racks, played, player.id, "totalRacks");
        }
        deduct(&mut one.stats.racks_won, racks_one, one.id, "racksWon");
        deduct(&mut two.stats.racks_won, racks_two, two.id, "racksWon");
    }

    for (side, player) in [(Side::One, &mut *one), (Side::Two, &mut *two)] {
        if let Some(points) = score.ranking_points(side) {
            deduct_points(player, points);
        }
    }

    for (side, player) in [(Side::One, &mut *one), (Side::Two, &mut *two)] {
        let Some(place) = score.place(side) else {
            continue;
        };
        if player.stats.highest_place == Some(place) {
            let best = store.best_placement(player.id, match_id).await?;
            log::debug!(
                "Best placement of player {} re-derived without match {}: {:?} -> {:?}",
                player.id,
                match_id,
                player.stats.highest_place,
                best
            );
            player.stats.highest_place = best;
        }
    }

    Ok(())
}

/// Best placement of `player` over `history`, ignoring the match `excluding`.
///
/// Player-one and player-two appearances are searched separately; the player-one best wins
/// unless it is missing or the player-two best is strictly lower.
pub fn best_placement_in(history: &[Match], player: PlayerId, excluding: MatchId) -> Option<u32> {
    let best_on = |side: Side| {
        history
            .iter()
            .filter(|m| m.id != excluding && m.details.player_id(side) == player)
            .filter_map(|m| m.score().place(side))
            .min()
    };
    match (best_on(Side::One), best_on(Side::Two)) {
        (Some(one), Some(two)) if two < one => Some(two),
        (Some(one), _) => Some(one),
        (None, two) => two,
    }
}
