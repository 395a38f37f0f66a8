//! The league's single upcoming event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextEvent {
    pub id: Uuid,
    pub name: String,
    pub date_time: DateTime<Utc>,
}

impl NextEvent {
    pub fn new(name: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date_time,
        }
    }
}

/// Body for announcing the next event.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextEventDraft {
    pub name: String,
    pub date_time: DateTime<Utc>,
}
