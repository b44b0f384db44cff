//! Thought store use-cases.
//!
//! # Responsibility
//! - Orchestrate storage calls into lifecycle operations and grouped loads.
//! - Keep the UI layer decoupled from key naming and storage errors.

pub mod grouping;
pub mod lifecycle;
pub mod loader;
pub mod thought_store;
