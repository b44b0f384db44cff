//! Storage access layer.
//!
//! # Responsibility
//! - Wrap the host key-value primitive behind an error-absorbing boundary.
//! - Keep backend error types out of lifecycle orchestration.
//!
//! # Invariants
//! - No adapter operation returns an error; failures are logged and mapped
//!   to empty or boolean fallbacks.

pub mod storage_adapter;
