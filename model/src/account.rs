//! Account status model.

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use serde_json::Number;

/// The status an account is reported with when the client does not say.
pub const DEFAULT_STATUS: &str = "Offline";
/// The game an account is reported in when the client does not say.
pub const DEFAULT_GAME: &str = "Unknown";
/// The server an account is reported on when the client does not say.
pub const DEFAULT_SERVER: &str = "N/A";

/// The last reported state of an account.
///
/// There is at most one of these per `username` in the store; posting a new
/// update for the same username replaces the old one.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The username of the account.
    pub username: String,
    /// The account's balance.
    ///
    /// Kept as the number the client sent, so integers stay integers.
    pub balance: Number,
    /// A free-form status, like `Online` or `Offline`.
    pub status: String,
    /// The game the account is currently in.
    pub game: String,
    /// The server the account is currently on.
    pub server: String,
    /// When the server last accepted an update for this account.
    pub last_updated: DateTime<Utc>,
}
