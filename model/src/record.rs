//! Stored records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use serde_json::Value;

use crate::{Account, Stat};

/// A single record in the store.
///
/// Both shapes share one collection, so every record carries a `kind`
/// discriminant on the wire:
///
/// ```json
/// { "kind": "account", "username": "metal", "balance": 0, ... }
/// { "kind": "stat", "userId": "42", "username": "metal", "kills": 3, ... }
/// ```
///
/// Records written before the discriminant existed are still accepted; an
/// untagged object with a `userId` is read as a [`Stat`], anything else as an
/// [`Account`]. A record that fits neither shape is kept as [`Record::Other`]
/// and written back exactly as it was read.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Account(Account),
    Stat(Stat),
    /// Well-formed JSON that isn't a known record shape.
    Other(Value),
}

impl Record {
    /// The username the record was submitted under.
    ///
    /// Empty if an [`Other`](Record::Other) record has no string `username`.
    pub fn username(&self) -> &str {
        match self {
            Record::Account(account) => &account.username,
            Record::Stat(stat) => &stat.username,
            Record::Other(value) => value
                .get("username")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }

    /// The record as an [`Account`], if it is one.
    pub fn as_account(&self) -> Option<&Account> {
        match self {
            Record::Account(account) => Some(account),
            _ => None,
        }
    }

    /// The record as a [`Stat`], if it is one.
    pub fn as_stat(&self) -> Option<&Stat> {
        match self {
            Record::Stat(stat) => Some(stat),
            _ => None,
        }
    }

    /// Whether the record is a stat submission.
    ///
    /// Unknown records count as stats if they carry a `userId`, the same rule
    /// used for untagged records.
    pub fn is_stat(&self) -> bool {
        match self {
            Record::Account(_) => false,
            Record::Stat(_) => true,
            Record::Other(value) => value.get("userId").is_some(),
        }
    }
}

impl From<Account> for Record {
    fn from(value: Account) -> Self {
        Record::Account(value)
    }
}

impl From<Stat> for Record {
    fn from(value: Stat) -> Self {
        Record::Stat(value)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Record::Account(account) => TaggedRecordRef::Account(account).serialize(serializer),
            Record::Stat(stat) => TaggedRecordRef::Stat(stat).serialize(serializer),
            Record::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RecordRepr::deserialize(deserializer).map(Record::from)
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedRecordRef<'a> {
    Account(&'a Account),
    Stat(&'a Stat),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordRepr {
    Tagged(TaggedRecord),
    LegacyStat(Stat),
    LegacyAccount(Account),
    Other(Value),
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedRecord {
    Account(Account),
    Stat(Stat),
}

impl From<RecordRepr> for Record {
    fn from(value: RecordRepr) -> Self {
        match value {
            RecordRepr::Tagged(TaggedRecord::Account(account)) => Record::Account(account),
            RecordRepr::Tagged(TaggedRecord::Stat(stat)) => Record::Stat(stat),
            RecordRepr::LegacyStat(stat) => Record::Stat(stat),
            RecordRepr::LegacyAccount(account) => Record::Account(account),
            RecordRepr::Other(value) => Record::Other(value),
        }
    }
}
