//! Store configuration and validation.
//!
//! # Responsibility
//! - Carry namespace prefixes and the archive retention window.
//! - Reject configurations that would make lifecycle state ambiguous.
//!
//! # Invariants
//! - Prefixes are non-empty and disjoint (neither is a prefix of the other).
//! - Retention is positive and bounded, so it always fits a `Duration`.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_ACTIVE_PREFIX: &str = "@thoughts:active:";
pub const DEFAULT_ARCHIVED_PREFIX: &str = "@thoughts:archived:";
/// Seven days.
pub const DEFAULT_RETENTION_MINUTES: i64 = 7 * 24 * 60;
/// One hundred years.
pub const MAX_RETENTION_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Invalid store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPrefix(&'static str),
    OverlappingPrefixes { active: String, archived: String },
    RetentionOutOfRange(i64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrefix(which) => write!(f, "{which} prefix cannot be empty"),
            Self::OverlappingPrefixes { active, archived } => write!(
                f,
                "namespace prefixes overlap: active `{active}`, archived `{archived}`"
            ),
            Self::RetentionOutOfRange(minutes) => write!(
                f,
                "retention must be between 1 and {MAX_RETENTION_MINUTES} minutes, got {minutes}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Construction parameters for `ThoughtStore`.
///
/// Missing fields fall back to defaults when deserialized, so hosts can pass
/// partial JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key prefix for active thoughts.
    pub active_prefix: String,
    /// Key prefix for archived (soft-deleted) thoughts.
    pub archived_prefix: String,
    /// Archived thoughts older than this are permanently removed.
    pub retention_minutes: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            active_prefix: DEFAULT_ACTIVE_PREFIX.to_string(),
            archived_prefix: DEFAULT_ARCHIVED_PREFIX.to_string(),
            retention_minutes: DEFAULT_RETENTION_MINUTES,
        }
    }
}

impl StoreConfig {
    /// Returns a default config with a custom retention window.
    pub fn with_retention_minutes(retention_minutes: i64) -> Self {
        Self {
            retention_minutes,
            ..Self::default()
        }
    }

    /// Retention window as a duration, clamped to the valid range.
    pub fn retention(&self) -> Duration {
        Duration::minutes(self.retention_minutes.clamp(0, MAX_RETENTION_MINUTES))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("active"));
        }
        if self.archived_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("archived"));
        }
        if self.active_prefix.starts_with(self.archived_prefix.as_str())
            || self.archived_prefix.starts_with(self.active_prefix.as_str())
        {
            return Err(ConfigError::OverlappingPrefixes {
                active: self.active_prefix.clone(),
                archived: self.archived_prefix.clone(),
            });
        }
        if !(1..=MAX_RETENTION_MINUTES).contains(&self.retention_minutes) {
            return Err(ConfigError::RetentionOutOfRange(self.retention_minutes));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_RETENTION_MINUTES};

    #[test]
    fn default_config_is_valid() {
        let config = StoreConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.retention().num_days(), 7);
        assert_eq!(config.retention_minutes, DEFAULT_RETENTION_MINUTES);
    }

    #[test]
    fn nested_prefixes_are_rejected() {
        let config = StoreConfig {
            active_prefix: "t:".to_string(),
            archived_prefix: "t:archived:".to_string(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverlappingPrefixes { .. })
        ));
    }

    #[test]
    fn empty_prefix_and_out_of_range_retention_are_rejected() {
        let empty = StoreConfig {
            archived_prefix: String::new(),
            ..StoreConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyPrefix("archived")));

        let zero = StoreConfig::with_retention_minutes(0);
        assert_eq!(zero.validate(), Err(ConfigError::RetentionOutOfRange(0)));

        let huge = StoreConfig::with_retention_minutes(i64::MAX);
        assert_eq!(huge.validate(), Err(ConfigError::RetentionOutOfRange(i64::MAX)));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"retention_minutes": 30}"#).expect("partial config");
        assert_eq!(config.retention_minutes, 30);
        assert_eq!(config.active_prefix, StoreConfig::default().active_prefix);
    }
}
