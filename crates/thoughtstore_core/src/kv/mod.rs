//! Key-value storage primitive consumed by the thought store.
//!
//! # Responsibility
//! - Define the host-supplied storage contract (`KeyValueStore`).
//! - Provide an in-memory backend and an SQLite backend.
//!
//! # Invariants
//! - Backends are not transactional across keys; callers order their writes.
//! - A listed key may hold no value (`None`), which readers must tolerate.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage primitive operation, used for logging and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KvOp {
    Get,
    Set,
    Remove,
    ListKeys,
    MultiGet,
    MultiRemove,
}

impl KvOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Remove => "remove",
            Self::ListKeys => "list_keys",
            Self::MultiGet => "multi_get",
            Self::MultiRemove => "multi_remove",
        }
    }
}

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend temporarily refused the operation.
    Unavailable { op: KvOp, reason: String },
    /// Connection schema is behind what this backend needs.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable { op, reason } => {
                write!(f, "storage {} unavailable: {reason}", op.as_str())
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}"
            ),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable { .. } | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Flat string key-value store supplied by the host environment.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&self, key: &str) -> KvResult<()>;
    fn list_all_keys(&self) -> KvResult<Vec<String>>;

    /// Fetches several keys, preserving input order.
    fn multi_get(&self, keys: &[String]) -> KvResult<Vec<(String, Option<String>)>> {
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            entries.push((key.clone(), self.get(key)?));
        }
        Ok(entries)
    }

    /// Removes several keys. Not atomic unless the backend says so.
    fn multi_remove(&self, keys: &[String]) -> KvResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }

    fn list_all_keys(&self) -> KvResult<Vec<String>> {
        (**self).list_all_keys()
    }

    fn multi_get(&self, keys: &[String]) -> KvResult<Vec<(String, Option<String>)>> {
        (**self).multi_get(keys)
    }

    fn multi_remove(&self, keys: &[String]) -> KvResult<()> {
        (**self).multi_remove(keys)
    }
}
