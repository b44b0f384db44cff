//! Presentation views derived from persisted thoughts.

use crate::model::thought::SavedThought;
use chrono::NaiveDate;

/// Thoughts created on one local calendar day.
///
/// Never persisted; owned by whoever asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtGroup {
    pub date: NaiveDate,
    /// Creation order, oldest first.
    pub thoughts: Vec<SavedThought>,
}

impl ThoughtGroup {
    /// Lets callers decide on a "Today" label.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }
}

/// Day-grouped result of a full load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedThoughts {
    pub active: Vec<ThoughtGroup>,
    pub archived: Vec<ThoughtGroup>,
}
