//! In-memory key-value backend with failure injection.

use super::{KeyValueStore, KvError, KvOp, KvResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, Option<String>>,
    fail_once: BTreeSet<KvOp>,
    fail_always: BTreeSet<KvOp>,
}

impl MemoryState {
    fn check(&mut self, op: KvOp) -> KvResult<()> {
        if self.fail_always.contains(&op) || self.fail_once.remove(&op) {
            return Err(KvError::Unavailable {
                op,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

/// `BTreeMap`-backed store. Keys list in lexicographic order.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    state: Mutex<MemoryState>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `key` but stores no value for it, like a host entry holding null.
    pub fn insert_dangling(&self, key: impl Into<String>) {
        self.lock().entries.insert(key.into(), None);
    }

    /// Makes the next call of `op` fail.
    pub fn fail_next(&self, op: KvOp) {
        self.lock().fail_once.insert(op);
    }

    /// Makes every call of `op` fail until cleared.
    pub fn fail_always(&self, op: KvOp) {
        self.lock().fail_always.insert(op);
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.fail_once.clear();
        state.fail_always.clear();
    }

    /// Raw snapshot of all keys, bypassing failure injection.
    pub fn keys(&self) -> Vec<String> {
        self.lock().entries.keys().cloned().collect()
    }

    /// Raw value lookup, bypassing failure injection.
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let mut state = self.lock();
        state.check(KvOp::Get)?;
        Ok(state.entries.get(key).cloned().flatten())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut state = self.lock();
        state.check(KvOp::Set)?;
        state
            .entries
            .insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let mut state = self.lock();
        state.check(KvOp::Remove)?;
        state.entries.remove(key);
        Ok(())
    }

    fn list_all_keys(&self) -> KvResult<Vec<String>> {
        let mut state = self.lock();
        state.check(KvOp::ListKeys)?;
        Ok(state.entries.keys().cloned().collect())
    }

    fn multi_get(&self, keys: &[String]) -> KvResult<Vec<(String, Option<String>)>> {
        let mut state = self.lock();
        state.check(KvOp::MultiGet)?;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), state.entries.get(key).cloned().flatten()))
            .collect())
    }

    fn multi_remove(&self, keys: &[String]) -> KvResult<()> {
        let mut state = self.lock();
        state.check(KvOp::MultiRemove)?;
        for key in keys {
            state.entries.remove(key);
        }
        Ok(())
    }
}
