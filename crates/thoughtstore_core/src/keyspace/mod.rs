//! Lifecycle namespaces encoded as storage key prefixes.
//!
//! # Responsibility
//! - Own every piece of prefix matching and key construction.
//! - Let one flat key-value store act as two partitions (active, archived).
//!
//! # Invariants
//! - A key belongs to at most one namespace.
//! - Keys matching neither prefix are foreign and never touched by the store.

mod codec;

pub use codec::{KeyCodec, Namespace};
