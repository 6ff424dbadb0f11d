//! Account request bodies.

use chrono::{DateTime, Utc};

use garde::Validate;

use serde::{Deserialize, Serialize};

use serde_json::Number;

use crate::account::{Account, DEFAULT_GAME, DEFAULT_SERVER, DEFAULT_STATUS};

use super::required;

/// Request body for `POST /api/update`.
///
/// Only `username` is required. Everything else falls back to a default
/// when it is left out, `null`, empty or zero.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateAccountRequest {
    /// The username of the account to update.
    #[serde(default)]
    #[garde(custom(required))]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub balance: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub game: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub server: Option<String>,
}

impl UpdateAccountRequest {
    /// Builds the stored account, stamped at `now`.
    pub fn into_account(self, now: DateTime<Utc>) -> Account {
        Account {
            username: self.username,
            balance: self
                .balance
                .filter(|balance| balance.as_f64() != Some(0.0))
                .unwrap_or_else(|| Number::from(0)),
            status: or_default(self.status, DEFAULT_STATUS),
            game: or_default(self.game, DEFAULT_GAME),
            server: or_default(self.server, DEFAULT_SERVER),
            last_updated: now,
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.into())
}
