//! Thought records.
//!
//! # Invariants
//! - `updated_at` is refreshed on every mutation and drives expiry.
//! - Unknown or malformed distortion entries decode as `None`.

use crate::model::distortion::CognitiveDistortion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-entered journal content before it has an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    /// The automatic (negative) thought as the user wrote it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub automatic_thought: String,
    /// Distortion tags in catalog order. Entries may be `None` in old data.
    #[serde(default, deserialize_with = "lenient_distortions")]
    pub cognitive_distortions: Vec<Option<CognitiveDistortion>>,
    /// The user's challenge to the automatic thought.
    #[serde(default, deserialize_with = "null_as_default")]
    pub challenge: String,
    /// The reframed thought.
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternative_thought: String,
}

impl Thought {
    pub fn new(automatic_thought: impl Into<String>) -> Self {
        Self {
            automatic_thought: automatic_thought.into(),
            cognitive_distortions: CognitiveDistortion::catalog()
                .into_iter()
                .map(Some)
                .collect(),
            ..Self::default()
        }
    }

    /// Marks the distortion with `slug` as selected. Returns false when absent.
    pub fn select_distortion(&mut self, slug: &str) -> bool {
        match self
            .cognitive_distortions
            .iter_mut()
            .flatten()
            .find(|distortion| distortion.slug == slug)
        {
            Some(distortion) => {
                distortion.selected = true;
                true
            }
            None => false,
        }
    }

    /// Selected, non-null distortion entries.
    pub fn selected_distortions(&self) -> impl Iterator<Item = &CognitiveDistortion> {
        self.cognitive_distortions
            .iter()
            .flatten()
            .filter(|distortion| distortion.selected)
    }
}

/// Structural problems that make a persisted record unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThoughtValidationError {
    EmptyId,
}

impl Display for ThoughtValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "thought identifier is empty"),
        }
    }
}

impl Error for ThoughtValidationError {}

/// A persisted thought.
///
/// The journal fields are flattened into the same JSON object as the
/// identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedThought {
    /// Namespaced storage key: lifecycle prefix plus identifier suffix.
    pub uuid: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub thought: Thought,
}

impl SavedThought {
    pub fn validate(&self) -> Result<(), ThoughtValidationError> {
        if self.uuid.trim().is_empty() {
            return Err(ThoughtValidationError::EmptyId);
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_distortions<'de, D>(
    deserializer: D,
) -> Result<Vec<Option<CognitiveDistortion>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|value| serde_json::from_value::<CognitiveDistortion>(value).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{SavedThought, Thought, ThoughtValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn decodes_null_and_malformed_distortion_entries() {
        let raw = r#"{
            "uuid": "@thoughts:active:1",
            "createdAt": "2023-01-01T10:00:00Z",
            "updatedAt": "2023-01-01T10:00:00Z",
            "automaticThought": "nobody called",
            "cognitiveDistortions": [
                null,
                {"slug": "mind-reading", "label": "Mind Reading", "selected": true},
                42,
                {"label": "no slug"}
            ]
        }"#;

        let saved: SavedThought = serde_json::from_str(raw).expect("lenient decode");
        assert_eq!(saved.thought.cognitive_distortions.len(), 4);
        assert!(saved.thought.cognitive_distortions[0].is_none());
        assert!(saved.thought.cognitive_distortions[2].is_none());
        assert!(saved.thought.cognitive_distortions[3].is_none());
        let selected: Vec<_> = saved
            .thought
            .selected_distortions()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(selected, vec!["mind-reading"]);
        assert_eq!(saved.thought.challenge, "");
    }

    #[test]
    fn null_distortion_list_decodes_as_empty() {
        let raw = r#"{
            "uuid": "@thoughts:active:1",
            "createdAt": "2023-01-01T10:00:00Z",
            "updatedAt": "2023-01-01T10:00:00Z",
            "cognitiveDistortions": null,
            "alternativeThought": null
        }"#;

        let saved: SavedThought = serde_json::from_str(raw).expect("null list decode");
        assert!(saved.thought.cognitive_distortions.is_empty());
        assert_eq!(saved.thought.alternative_thought, "");
    }

    #[test]
    fn select_distortion_marks_catalog_entry() {
        let mut thought = Thought::new("I always fail");
        assert!(thought.select_distortion("all-or-nothing"));
        assert!(!thought.select_distortion("not-a-slug"));
        assert_eq!(thought.selected_distortions().count(), 1);
    }

    #[test]
    fn blank_uuid_fails_validation() {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let saved = SavedThought {
            uuid: "  ".to_string(),
            created_at: at,
            updated_at: at,
            thought: Thought::default(),
        };
        assert_eq!(saved.validate(), Err(ThoughtValidationError::EmptyId));
    }
}
