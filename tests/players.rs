//! Integration tests for player management and the next event.

mod common;

use common::{day, details, draft, seed_player, with_racks};
use pool_league_web::{
    create_match, create_player, delete_player, get_match, list_players, next_event,
    player_profile, replace_next_event, update_player, LeagueError, MemoryStore, NextEventDraft,
    PlayerIdentity,
};

fn identity(first: &str, last: &str, is_female: bool) -> PlayerIdentity {
    PlayerIdentity {
        first_name: first.into(),
        last_name: last.into(),
        is_female,
    }
}

#[tokio::test]
async fn names_are_trimmed_and_required() {
    let store = MemoryStore::new();

    let p = create_player(&store, draft("  Ana ", "Kovac ")).await.unwrap();
    assert_eq!(p.display_name(), "Kovac Ana");

    assert!(matches!(
        create_player(&store, draft("   ", "Kovac")).await,
        Err(LeagueError::Validation(_))
    ));
}

#[tokio::test]
async fn duplicate_names_are_rejected() {
    let store = MemoryStore::new();
    seed_player(&store, "Ana", "Kovac").await;

    assert_eq!(
        create_player(&store, draft("ana", "KOVAC")).await,
        Err(LeagueError::DuplicatePlayerName)
    );
    assert_eq!(list_players(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn seeded_zero_points_are_stored_as_none() {
    let store = MemoryStore::new();
    let mut d = draft("Ana", "Kovac");
    d.stats.ranking_points = Some(0.0);
    d.stats.total_matches = 30;

    let p = create_player(&store, d).await.unwrap();

    assert_eq!(p.stats.ranking_points, None);
    assert_eq!(p.stats.total_matches, 30);
}

#[tokio::test]
async fn players_are_listed_by_last_then_first_name() {
    let store = MemoryStore::new();
    seed_player(&store, "Zoe", "Babic").await;
    seed_player(&store, "Ana", "Kovac").await;
    seed_player(&store, "Ana", "babic").await;

    let names: Vec<_> = list_players(&store)
        .await
        .unwrap()
        .iter()
        .map(|p| p.display_name())
        .collect();

    assert_eq!(names, vec!["babic Ana", "Babic Zoe", "Kovac Ana"]);
}

#[tokio::test]
async fn identity_change_rewrites_every_match() {
    let store = MemoryStore::new();
    let ana = seed_player(&store, "Ana", "Kovac").await;
    let ben = seed_player(&store, "Ben", "Horvat").await;
    let cid = seed_player(&store, "Cid", "Novak").await;
    let as_one = create_match(&store, with_racks(details(&ana, &ben), 5, 3)).await.unwrap();
    let as_two = create_match(&store, details(&cid, &ana)).await.unwrap();
    let unrelated = create_match(&store, details(&ben, &cid)).await.unwrap();

    let renamed = update_player(&store, ana.id, identity("Anna", "Kovacic", false))
        .await
        .unwrap();

    assert_eq!(renamed.display_name(), "Kovacic Anna");
    let one = get_match(&store, as_one.id).await.unwrap();
    assert_eq!(one.details.player1, "Kovacic Anna");
    assert_eq!(one.details.is_player1_female, Some(false));
    assert_eq!(one.details.player2, "Horvat Ben");
    let two = get_match(&store, as_two.id).await.unwrap();
    assert_eq!(two.details.player2, "Kovacic Anna");
    assert_eq!(two.details.is_player2_female, Some(false));
    assert_eq!(get_match(&store, unrelated.id).await.unwrap(), unrelated);

    // Statistics are untouched by an identity change.
    let profile = player_profile(&store, ana.id).await.unwrap();
    assert_eq!(profile.player.stats.total_matches, 2);
}

#[tokio::test]
async fn rename_onto_taken_name_changes_nothing() {
    let store = MemoryStore::new();
    let ana = seed_player(&store, "Ana", "Kovac").await;
    let ben = seed_player(&store, "Ben", "Horvat").await;
    let m = create_match(&store, details(&ana, &ben)).await.unwrap();

    let result = update_player(&store, ana.id, identity("Ben", "Horvat", false)).await;

    assert_eq!(result, Err(LeagueError::DuplicatePlayerName));
    assert_eq!(get_match(&store, m.id).await.unwrap().details.player1, "Kovac Ana");
    let profile = player_profile(&store, ana.id).await.unwrap();
    assert_eq!(profile.player.first_name, "Ana");
}

#[tokio::test]
async fn deleting_a_player_keeps_their_matches() {
    let store = MemoryStore::new();
    let ana = seed_player(&store, "Ana", "Kovac").await;
    let ben = seed_player(&store, "Ben", "Horvat").await;
    let m = create_match(&store, details(&ana, &ben)).await.unwrap();

    delete_player(&store, ana.id).await.unwrap();

    assert_eq!(
        player_profile(&store, ana.id).await,
        Err(LeagueError::PlayerNotFound(ana.id))
    );
    assert_eq!(get_match(&store, m.id).await.unwrap(), m);
    assert_eq!(
        delete_player(&store, ana.id).await,
        Err(LeagueError::PlayerNotFound(ana.id))
    );
}

#[tokio::test]
async fn profile_lists_own_matches_newest_first() {
    let store = MemoryStore::new();
    let ana = seed_player(&store, "Ana", "Kovac").await;
    let ben = seed_player(&store, "Ben", "Horvat").await;
    let cid = seed_player(&store, "Cid", "Novak").await;
    let mut early = details(&ana, &ben);
    early.date = day(3);
    let mut late = details(&cid, &ana);
    late.date = day(20);
    let early = create_match(&store, early).await.unwrap();
    let late = create_match(&store, late).await.unwrap();
    create_match(&store, details(&ben, &cid)).await.unwrap();

    let profile = player_profile(&store, ana.id).await.unwrap();

    let ids: Vec<_> = profile.matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![late.id, early.id]);
}

#[tokio::test]
async fn next_event_is_replaced() {
    let store = MemoryStore::new();
    assert_eq!(next_event(&store).await.unwrap(), None);

    replace_next_event(
        &store,
        NextEventDraft {
            name: "Spring Open".into(),
            date_time: day(10),
        },
    )
    .await
    .unwrap();
    let second = replace_next_event(
        &store,
        NextEventDraft {
            name: " League Night ".into(),
            date_time: day(17),
        },
    )
    .await
    .unwrap();

    assert_eq!(second.name, "League Night");
    assert_eq!(next_event(&store).await.unwrap(), Some(second));

    let blank = replace_next_event(
        &store,
        NextEventDraft {
            name: " ".into(),
            date_time: day(24),
        },
    )
    .await;
    assert!(matches!(blank, Err(LeagueError::Validation(_))));
}
