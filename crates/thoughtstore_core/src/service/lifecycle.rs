//! Thought lifecycle mutations.
//!
//! # Responsibility
//! - Create and edit thoughts in place.
//! - Move thoughts between the active and archived namespaces.
//! - Remove thoughts permanently, explicitly or through expiry.
//!
//! # Invariants
//! - A move writes the destination key before removing the source key, so an
//!   interruption can duplicate a thought but never lose it.
//! - A failed encode or write leaves storage exactly as it was.
//! - Keys outside both namespaces are never read, written or removed.

use crate::keyspace::Namespace;
use crate::kv::KeyValueStore;
use crate::model::thought::{SavedThought, Thought};
use crate::service::thought_store::ThoughtStore;
use log::{error, info, warn};
use uuid::Uuid;

/// Input to `ThoughtStore::save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveInput {
    /// Not yet persisted; gets a fresh identifier.
    New(Thought),
    /// Already persisted; written in place.
    Existing(SavedThought),
}

impl From<Thought> for SaveInput {
    fn from(value: Thought) -> Self {
        Self::New(value)
    }
}

impl From<SavedThought> for SaveInput {
    fn from(value: SavedThought) -> Self {
        Self::Existing(value)
    }
}

/// Result of `ThoughtStore::save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written under `uuid`.
    Saved(SavedThought),
    /// Nothing was written; carries the caller's input unchanged.
    Unsaved(SaveInput),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    pub fn saved(&self) -> Option<&SavedThought> {
        match self {
            Self::Saved(thought) => Some(thought),
            Self::Unsaved(_) => None,
        }
    }

    pub fn into_saved(self) -> Option<SavedThought> {
        match self {
            Self::Saved(thought) => Some(thought),
            Self::Unsaved(_) => None,
        }
    }
}

impl<S: KeyValueStore> ThoughtStore<S> {
    /// Creates a new thought or rewrites an existing one in place.
    ///
    /// # Contract
    /// - New: mints an id, stamps `created_at = updated_at = now`, writes
    ///   under the active namespace.
    /// - Existing: refreshes `updated_at` only; the key does not change.
    /// - On encode or write failure nothing is persisted and the input comes
    ///   back as `SaveOutcome::Unsaved`.
    pub fn save(&self, input: impl Into<SaveInput>) -> SaveOutcome {
        let input = input.into();
        let Some(candidate) = self.prepare_save(&input) else {
            return SaveOutcome::Unsaved(input);
        };

        let payload = match self.codec.encode(&candidate) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=thought_save module=lifecycle status=error step=encode key={} error={}",
                    candidate.uuid, err
                );
                return SaveOutcome::Unsaved(input);
            }
        };

        if !self.storage.set(&candidate.uuid, &payload) {
            error!(
                "event=thought_save module=lifecycle status=error step=write key={}",
                candidate.uuid
            );
            return SaveOutcome::Unsaved(input);
        }

        info!(
            "event=thought_save module=lifecycle status=ok mode={} key={}",
            save_mode(&input),
            candidate.uuid
        );
        SaveOutcome::Saved(candidate)
    }

    /// Soft-deletes an active thought by moving it to the archived namespace.
    ///
    /// Returns the archived record, or `None` when nothing moved.
    pub fn archive(&self, key: &str) -> Option<SavedThought> {
        self.move_thought(key, Namespace::Active, Namespace::Archived, "thought_archive")
    }

    /// Moves an archived thought back to the active namespace.
    pub fn restore(&self, key: &str) -> Option<SavedThought> {
        self.move_thought(key, Namespace::Archived, Namespace::Active, "thought_restore")
    }

    /// Removes a thought outright, from either namespace.
    ///
    /// Returns whether the backend acknowledged the removal.
    pub fn permanent_delete(&self, key: &str) -> bool {
        let Some(namespace) = self.keys.namespace_of(key) else {
            warn!(
                "event=thought_delete module=lifecycle status=skipped reason=foreign_key key={}",
                key
            );
            return false;
        };

        let removed = self.storage.remove(key);
        if removed {
            info!(
                "event=thought_delete module=lifecycle status=ok namespace={} key={}",
                namespace, key
            );
        }
        removed
    }

    /// Permanently removes archived thoughts past retention, plus stale copies
    /// left behind by interrupted moves.
    ///
    /// Returns the number of keys removed, or `0` when the removal failed.
    pub fn expire_sweep(&self) -> usize {
        let scan = self.scan();
        let doomed = scan.doomed_keys();
        if self.sweep(&doomed) {
            doomed.len()
        } else {
            0
        }
    }

    fn prepare_save(&self, input: &SaveInput) -> Option<SavedThought> {
        let now = self.now();
        match input {
            SaveInput::New(thought) => {
                let id = Uuid::new_v4().to_string();
                Some(SavedThought {
                    uuid: self.keys.key_for(Namespace::Active, &id),
                    created_at: now,
                    updated_at: now,
                    thought: thought.clone(),
                })
            }
            SaveInput::Existing(saved) => {
                let has_id = self
                    .keys
                    .id_of(&saved.uuid)
                    .is_some_and(|id| !id.is_empty());
                if !has_id {
                    warn!(
                        "event=thought_save module=lifecycle status=skipped reason=foreign_key key={}",
                        saved.uuid
                    );
                    return None;
                }
                Some(SavedThought {
                    updated_at: now,
                    ..saved.clone()
                })
            }
        }
    }

    fn move_thought(
        &self,
        key: &str,
        from: Namespace,
        to: Namespace,
        event: &'static str,
    ) -> Option<SavedThought> {
        if self.keys.namespace_of(key) != Some(from) {
            warn!(
                "event={} module=lifecycle status=skipped reason=wrong_namespace expected={} key={}",
                event, from, key
            );
            return None;
        }

        let Some(raw) = self.storage.get(key) else {
            warn!(
                "event={} module=lifecycle status=skipped reason=not_found key={}",
                event, key
            );
            return None;
        };

        let mut thought = match self.codec.decode(&raw) {
            Ok(thought) => thought,
            Err(err) => {
                warn!(
                    "event={} module=lifecycle status=skipped reason=corrupt key={} error={}",
                    event, key, err
                );
                return None;
            }
        };

        let target_key = self.keys.rekey(key, to)?;
        thought.uuid = target_key.clone();
        thought.updated_at = self.now();

        let payload = match self.codec.encode(&thought) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event={} module=lifecycle status=error step=encode key={} error={}",
                    event, key, err
                );
                return None;
            }
        };

        // Destination first: the source is only removed once the copy exists.
        if !self.storage.set(&target_key, &payload) {
            error!(
                "event={} module=lifecycle status=error step=write key={} target={}",
                event, key, target_key
            );
            return None;
        }

        if !self.storage.remove(key) {
            warn!(
                "event={} module=lifecycle status=partial step=remove_source key={} target={}",
                event, key, target_key
            );
        } else {
            info!(
                "event={} module=lifecycle status=ok key={} target={}",
                event, key, target_key
            );
        }

        Some(thought)
    }
}

fn save_mode(input: &SaveInput) -> &'static str {
    match input {
        SaveInput::New(_) => "create",
        SaveInput::Existing(_) => "update",
    }
}
