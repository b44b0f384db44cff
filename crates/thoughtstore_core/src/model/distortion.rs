//! Cognitive distortion tags and their fixed catalog.

use serde::{Deserialize, Serialize};

/// `(slug, label)` pairs offered to the user, in display order.
const CATALOG: &[(&str, &str)] = &[
    ("all-or-nothing", "All or Nothing Thinking"),
    ("overgeneralization", "Overgeneralization"),
    ("filtering", "Filtering Out the Positive"),
    ("disqualifying-the-positive", "Disqualifying the Positive"),
    ("mind-reading", "Mind Reading"),
    ("fortune-telling", "Fortune Telling"),
    ("magnification-of-the-negative", "Magnification of the Negative"),
    ("minimization-of-the-positive", "Minimization of the Positive"),
    ("catastrophizing", "Catastrophizing"),
    ("emotional-reasoning", "Emotional Reasoning"),
    ("should-statements", "Should Statements"),
    ("labeling", "Labeling"),
    ("self-blaming", "Self-Blaming"),
    ("other-blaming", "Other-Blaming"),
];

/// One distortion tag attached to a thought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveDistortion {
    /// Stable identifier; labels may change between releases.
    pub slug: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl CognitiveDistortion {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Full catalog, every entry unselected.
    pub fn catalog() -> Vec<Self> {
        CATALOG
            .iter()
            .map(|(slug, label)| Self::new(*slug, *label))
            .collect()
    }

    pub fn is_known_slug(slug: &str) -> bool {
        CATALOG.iter().any(|(known, _)| *known == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::CognitiveDistortion;
    use std::collections::HashSet;

    #[test]
    fn catalog_slugs_are_unique_and_unselected() {
        let catalog = CognitiveDistortion::catalog();
        let slugs: HashSet<_> = catalog.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs.len(), catalog.len());
        assert!(catalog.iter().all(|d| !d.selected));
        assert!(CognitiveDistortion::is_known_slug("catastrophizing"));
    }
}
