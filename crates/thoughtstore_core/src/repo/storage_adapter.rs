//! Error-absorbing wrapper over a `KeyValueStore`.
//!
//! # Responsibility
//! - Expose get/set/remove/list/batch operations with uniform fallbacks.
//! - Log every backend failure once, with the operation and key count.
//!
//! # Invariants
//! - Failing to persist one change is recoverable; nothing here panics or
//!   propagates an error to the lifecycle layer.
//! - Keys are logged, values never are.

use crate::kv::{KeyValueStore, KvError, KvOp};
use log::{debug, error};

/// Storage boundary used by the lifecycle manager and collection loader.
pub struct StorageAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store, for callers that need raw access (tests, tooling).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Returns the stored value, or `None` when absent or on failure.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log_failure(KvOp::Get, Some(key), 1, &err);
                None
            }
        }
    }

    /// Returns whether the write was acknowledged.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                log_failure(KvOp::Set, Some(key), 1, &err);
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(err) => {
                log_failure(KvOp::Remove, Some(key), 1, &err);
                false
            }
        }
    }

    /// All keys, or empty on failure.
    pub fn list_all_keys(&self) -> Vec<String> {
        match self.store.list_all_keys() {
            Ok(keys) => keys,
            Err(err) => {
                log_failure(KvOp::ListKeys, None, 0, &err);
                Vec::new()
            }
        }
    }

    /// `(key, value)` pairs in input order, or empty on failure.
    pub fn batch_get(&self, keys: &[String]) -> Vec<(String, Option<String>)> {
        if keys.is_empty() {
            return Vec::new();
        }
        match self.store.multi_get(keys) {
            Ok(entries) => entries,
            Err(err) => {
                log_failure(KvOp::MultiGet, None, keys.len(), &err);
                Vec::new()
            }
        }
    }

    /// Best-effort removal; an empty batch trivially succeeds.
    pub fn batch_remove(&self, keys: &[String]) -> bool {
        if keys.is_empty() {
            return true;
        }
        match self.store.multi_remove(keys) {
            Ok(()) => {
                debug!(
                    "event=storage_batch_remove module=storage status=ok key_count={}",
                    keys.len()
                );
                true
            }
            Err(err) => {
                log_failure(KvOp::MultiRemove, None, keys.len(), &err);
                false
            }
        }
    }
}

fn log_failure(op: KvOp, key: Option<&str>, key_count: usize, err: &KvError) {
    match key {
        Some(key) => error!(
            "event=storage_{} module=storage status=error key={} error={}",
            op.as_str(),
            key,
            err
        ),
        None => error!(
            "event=storage_{} module=storage status=error key_count={} error={}",
            op.as_str(),
            key_count,
            err
        ),
    }
}
