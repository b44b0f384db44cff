//! Core domain logic for the thought journal.
//! This crate is the single source of truth for thought lifecycle invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod keyspace;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use keyspace::{KeyCodec, Namespace};
pub use kv::{KeyValueStore, KvError, KvOp, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::codec::{CodecError, JsonThoughtCodec, ThoughtCodec};
pub use model::distortion::CognitiveDistortion;
pub use model::group::{GroupedThoughts, ThoughtGroup};
pub use model::thought::{SavedThought, Thought, ThoughtValidationError};
pub use repo::storage_adapter::StorageAdapter;
pub use service::grouping::group_by_day;
pub use service::lifecycle::{SaveInput, SaveOutcome};
pub use service::loader::ThoughtCollection;
pub use service::thought_store::ThoughtStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
