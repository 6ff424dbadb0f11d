//! Stat request bodies.

use chrono::{DateTime, Utc};

use garde::Validate;

use serde::{Deserialize, Serialize};

use crate::Stat;

use super::required;

/// Request body for `POST /api/accounts`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStatRequest {
    #[serde(default)]
    #[garde(custom(required))]
    pub user_id: String,
    #[serde(default)]
    #[garde(custom(required))]
    pub username: String,
    /// Defaults to `0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub kills: Option<i64>,
    /// Defaults to `0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub deaths: Option<i64>,
}

impl SubmitStatRequest {
    /// Builds the stored stat, stamped at `now`.
    pub fn into_stat(self, now: DateTime<Utc>) -> Stat {
        Stat {
            user_id: self.user_id,
            username: self.username,
            kills: self.kills.unwrap_or(0),
            deaths: self.deaths.unwrap_or(0),
            updated: now,
        }
    }
}
