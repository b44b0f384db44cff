//! Collection loading, validation and garbage collection.
//!
//! # Responsibility
//! - Read every namespaced record in one pass.
//! - Drop missing, null, unparsable and structurally invalid entries.
//! - Collapse duplicates left by interrupted moves.
//! - Exclude and sweep archived records past retention.
//!
//! # Invariants
//! - Corrupt data never surfaces as an error.
//! - Each identifier suffix appears at most once in a result.
//! - Sweeping is best effort; a failed sweep is retried by the next load.

use crate::keyspace::Namespace;
use crate::kv::KeyValueStore;
use crate::model::thought::SavedThought;
use crate::service::thought_store::ThoughtStore;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Flat load result, partitioned by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtCollection {
    /// Oldest first.
    pub active: Vec<SavedThought>,
    /// Oldest first; expired records already excluded.
    pub archived: Vec<SavedThought>,
}

impl ThoughtCollection {
    pub fn len(&self) -> usize {
        self.active.len() + self.archived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.archived.is_empty()
    }
}

pub(crate) struct Scan {
    pub(crate) collection: ThoughtCollection,
    pub(crate) expired: Vec<String>,
    pub(crate) stale: Vec<String>,
}

impl Scan {
    pub(crate) fn doomed_keys(&self) -> Vec<String> {
        self.expired.iter().chain(&self.stale).cloned().collect()
    }
}

struct Candidate {
    namespace: Namespace,
    thought: SavedThought,
}

impl Candidate {
    /// Later `updated_at` wins; on a tie the active copy wins.
    fn supersedes(&self, other: &Candidate) -> bool {
        match self.thought.updated_at.cmp(&other.thought.updated_at) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                self.namespace == Namespace::Active && other.namespace != Namespace::Active
            }
        }
    }
}

impl<S: KeyValueStore> ThoughtStore<S> {
    /// Loads active and unexpired archived thoughts, sweeping what expired.
    pub fn load_collection(&self) -> ThoughtCollection {
        let scan = self.scan();
        let doomed = scan.doomed_keys();
        self.sweep(&doomed);

        info!(
            "event=thoughts_load module=loader status=ok active={} archived={} expired={} stale={}",
            scan.collection.active.len(),
            scan.collection.archived.len(),
            scan.expired.len(),
            scan.stale.len()
        );
        scan.collection
    }

    pub(crate) fn scan(&self) -> Scan {
        let keys: Vec<String> = self
            .storage
            .list_all_keys()
            .into_iter()
            .filter(|key| self.keys.namespace_of(key).is_some())
            .collect();
        let entries = self.storage.batch_get(&keys);

        let mut by_id: BTreeMap<String, Candidate> = BTreeMap::new();
        let mut stale = Vec::new();
        for (key, value) in entries {
            let Some((id, candidate)) = self.decode_entry(&key, value) else {
                continue;
            };
            match by_id.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
                Entry::Occupied(mut slot) => {
                    let loser = if candidate.supersedes(slot.get()) {
                        slot.insert(candidate)
                    } else {
                        candidate
                    };
                    debug!(
                        "event=thoughts_load module=loader status=duplicate stale_key={}",
                        loser.thought.uuid
                    );
                    stale.push(loser.thought.uuid);
                }
            }
        }

        let now = self.now();
        let mut collection = ThoughtCollection::default();
        let mut expired = Vec::new();
        for candidate in by_id.into_values() {
            match candidate.namespace {
                Namespace::Active => collection.active.push(candidate.thought),
                Namespace::Archived => {
                    let age = now.signed_duration_since(candidate.thought.updated_at);
                    if age > self.retention {
                        expired.push(candidate.thought.uuid);
                    } else {
                        collection.archived.push(candidate.thought);
                    }
                }
            }
        }

        sort_by_creation(&mut collection.active);
        sort_by_creation(&mut collection.archived);
        Scan {
            collection,
            expired,
            stale,
        }
    }

    pub(crate) fn sweep(&self, keys: &[String]) -> bool {
        if keys.is_empty() {
            return true;
        }
        let removed = self.storage.batch_remove(keys);
        if removed {
            info!(
                "event=thoughts_sweep module=loader status=ok key_count={}",
                keys.len()
            );
        } else {
            warn!(
                "event=thoughts_sweep module=loader status=error key_count={} retry=next_load",
                keys.len()
            );
        }
        removed
    }

    fn decode_entry(&self, key: &str, value: Option<String>) -> Option<(String, Candidate)> {
        let namespace = self.keys.namespace_of(key)?;
        let id = match self.keys.id_of(key) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                warn!(
                    "event=thoughts_load module=loader status=skipped reason=empty_id key={}",
                    key
                );
                return None;
            }
        };

        let Some(raw) = value else {
            warn!(
                "event=thoughts_load module=loader status=skipped reason=missing_value key={}",
                key
            );
            return None;
        };

        let mut thought = match self.codec.decode(&raw) {
            Ok(thought) => thought,
            Err(err) => {
                warn!(
                    "event=thoughts_load module=loader status=skipped reason=corrupt key={} error={}",
                    key, err
                );
                return None;
            }
        };

        if thought.uuid != key {
            warn!(
                "event=thoughts_load module=loader status=repaired reason=uuid_mismatch key={}",
                key
            );
            thought.uuid = key.to_string();
        }

        if let Err(err) = thought.validate() {
            warn!(
                "event=thoughts_load module=loader status=skipped reason=invalid key={} error={}",
                key, err
            );
            return None;
        }

        Some((id, Candidate { namespace, thought }))
    }
}

fn sort_by_creation(thoughts: &mut [SavedThought]) {
    thoughts.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.uuid.cmp(&b.uuid))
    });
}
