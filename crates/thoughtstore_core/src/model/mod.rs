//! Journaling domain model.
//!
//! # Responsibility
//! - Define the transient `Thought` and the persisted `SavedThought`.
//! - Define derived, non-persisted day groups.
//! - Own the persisted record encoding.
//!
//! # Invariants
//! - `SavedThought::uuid` is also the storage key; its prefix is the
//!   lifecycle state.
//! - Historical drift (null distortion entries, missing fields) decodes
//!   without error.

pub mod codec;
pub mod distortion;
pub mod group;
pub mod thought;
