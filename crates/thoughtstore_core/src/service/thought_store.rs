//! Store facade exposed to the UI layer.
//!
//! # Responsibility
//! - Hold the storage adapter, key codec, record codec, clock and retention.
//! - Expose grouped loading; mutations live in `lifecycle`, scanning in
//!   `loader`.
//!
//! # Invariants
//! - Construction validates configuration; nothing after that returns errors.

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, StoreConfig};
use crate::keyspace::KeyCodec;
use crate::kv::KeyValueStore;
use crate::model::codec::{JsonThoughtCodec, ThoughtCodec};
use crate::model::group::GroupedThoughts;
use crate::repo::storage_adapter::StorageAdapter;
use crate::service::grouping::group_by_day;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use log::info;
use std::sync::Arc;

/// Thought lifecycle store over a host key-value primitive.
pub struct ThoughtStore<S: KeyValueStore> {
    pub(crate) storage: StorageAdapter<S>,
    pub(crate) keys: KeyCodec,
    pub(crate) retention: Duration,
    pub(crate) codec: Box<dyn ThoughtCodec>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> ThoughtStore<S> {
    /// Builds a store with JSON encoding and the system clock.
    ///
    /// # Errors
    /// - Returns `ConfigError` for empty/overlapping prefixes or a
    ///   retention window outside the supported range.
    pub fn try_new(store: S, config: StoreConfig) -> Result<Self, ConfigError> {
        let keys = KeyCodec::from_config(&config)?;
        info!(
            "event=store_init module=service status=ok retention_minutes={}",
            config.retention_minutes
        );
        Ok(Self {
            storage: StorageAdapter::new(store),
            keys,
            retention: config.retention(),
            codec: Box::new(JsonThoughtCodec),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_codec(mut self, codec: impl ThoughtCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn keys(&self) -> &KeyCodec {
        &self.keys
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    /// Loads everything, grouped by day in the local time zone.
    pub fn load_all(&self) -> GroupedThoughts {
        self.load_all_in(&Local)
    }

    /// Loads everything, grouped by day in `tz`.
    pub fn load_all_in<Tz: TimeZone>(&self, tz: &Tz) -> GroupedThoughts {
        let collection = self.load_collection();
        GroupedThoughts {
            active: group_by_day(collection.active, tz),
            archived: group_by_day(collection.archived, tz),
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
