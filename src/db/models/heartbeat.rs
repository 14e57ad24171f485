//! Heartbeat data model.
//!
//! A heartbeat is one activity sample handed over by the capture side:
//! which executable and window were focused, for how long, and whether the
//! user was idle during it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heartbeat {
    pub path: String,
    pub window_title: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub idle: bool,
}

impl Heartbeat {
    pub fn duration_secs(&self) -> i64 {
        (self.ended_at - self.started_at).num_seconds()
    }
}
