//! The record store.
//!
//! All records live in a single JSON array on disk. The whole array is read
//! on every access and rewritten on every change; nothing is cached between
//! requests.
//!
//! Reads and writes never fail loudly. A missing or unreadable file reads as
//! an empty store, and a failed write is reported as `false`. Both are logged.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use account_board_model::Record;

use derive_more::{Display, Error};

use tokio::{fs, io::AsyncWriteExt as _, sync::Mutex};

/// A handle to the backing file.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct RecordStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    /// Held across a load-modify-save so writers in this process don't
    /// clobber each other. Other processes writing the same file still can.
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Opens the store at `path`, creating it with no records if it does not
    /// exist yet.
    ///
    /// An existing file is left untouched, even if it is malformed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<RecordStore, StoreError> {
        let path = path.into();

        let created = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match created {
            Ok(mut file) => {
                tracing::info!(path = %path.display(), "creating new record store");

                let result = async {
                    file.write_all(b"[]").await?;
                    file.flush().await
                }
                .await;

                if let Err(source) = result {
                    return Err(StoreError { path, source });
                }
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => (),
            Err(source) => return Err(StoreError { path, source }),
        }

        Ok(RecordStore {
            inner: Arc::new(StoreInner {
                path,
                write_lock: Mutex::new(()),
            }),
        })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Reads every record in the store.
    pub async fn load_all(&self) -> Vec<Record> {
        let data = match fs::read(self.path()).await {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::error!(path = %self.path().display(), %err, "failed to read records");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(
                    path = %self.path().display(),
                    %err,
                    "record store is malformed, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the store with `records`.
    ///
    /// Returns `false` if the records could not be written.
    pub async fn save_all(&self, records: &[Record]) -> bool {
        let data = match serde_json::to_vec_pretty(records) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(%err, "failed to serialize records");
                return false;
            }
        };

        match fs::write(self.path(), data).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(path = %self.path().display(), %err, "failed to write records");
                false
            }
        }
    }

    /// Loads the store, applies `f` and saves the result.
    ///
    /// Only one `modify` runs at a time per store. Returns the result of the
    /// save.
    pub async fn modify<F>(&self, f: F) -> bool
    where
        F: FnOnce(Vec<Record>) -> Vec<Record>,
    {
        let _guard = self.inner.write_lock.lock().await;

        let records = self.load_all().await;
        self.save_all(&f(records)).await
    }
}

/// The store could not be opened.
#[derive(Debug, Display, Error)]
#[display("failed to open record store at {}: {source}", path.display())]
pub struct StoreError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Replaces the account with the same username as `account`, keeping its
/// position, or appends `account` if there is none.
///
/// Stat records are never replaced. Unrecognized records that don't look like
/// stats are replaced like accounts.
pub fn upsert_by_username(mut records: Vec<Record>, account: Record) -> Vec<Record> {
    let existing = records
        .iter()
        .position(|record| !record.is_stat() && record.username() == account.username());

    match existing {
        Some(ix) => records[ix] = account,
        None => records.push(account),
    }

    records
}

/// Appends `record`.
pub fn append_always(mut records: Vec<Record>, record: Record) -> Vec<Record> {
    records.push(record);
    records
}

/// Finds the record for `username`.
///
/// Prefers the account record; if there isn't one, the first record of any
/// kind with that username.
pub fn find_by_username<'a>(records: &'a [Record], username: &str) -> Option<&'a Record> {
    records
        .iter()
        .find(|record| !record.is_stat() && record.username() == username)
        .or_else(|| records.iter().find(|record| record.username() == username))
}
