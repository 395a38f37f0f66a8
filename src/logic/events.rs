//! The upcoming event: at most one exists, a new one replaces it.

use crate::models::{LeagueError, NextEvent, NextEventDraft};
use crate::store::{LeagueStore, Transaction};

pub async fn next_event<S>(store: &S) -> Result<Option<NextEvent>, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    store.next_event().await
}

pub async fn replace_next_event<S>(store: &S, draft: NextEventDraft) -> Result<NextEvent, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(LeagueError::Validation("name must not be empty".into()));
    }
    let event = NextEvent::new(name, draft.date_time);

    let mut tx = Transaction::new();
    tx.replace_next_event(event.clone());
    store.commit(tx).await?;

    log::info!("Next event is now {} at {}", event.name, event.date_time);
    Ok(event)
}
