//! Stat submission model.

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

/// A single stat submission.
///
/// Unlike [`Account`](crate::Account)s, stats are never deduplicated. Every
/// submission is kept, so a `username` may appear any number of times.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    /// The id of the submitting user.
    pub user_id: String,
    /// The username of the submitting user.
    pub username: String,
    pub kills: i64,
    pub deaths: i64,
    /// When the server accepted the submission.
    pub updated: DateTime<Utc>,
}
