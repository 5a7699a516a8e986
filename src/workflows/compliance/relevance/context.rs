use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::EntitySnapshot;

/// Maximum number of distinct view signals retained per user.
pub const RECENT_SIGNAL_CAP: usize = 5;

/// Capped FIFO of distinct view-signal tags.
///
/// Recording an already-present tag is a no-op and does not reorder the
/// window; recording a new tag past the cap evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalWindow {
    signals: VecDeque<String>,
}

impl SignalWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if self.signals.iter().any(|existing| existing == &tag) {
            return;
        }
        self.signals.push_back(tag);
        if self.signals.len() > RECENT_SIGNAL_CAP {
            self.signals.pop_front();
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.signals.iter().any(|existing| existing == tag)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Tags in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SignalWindow {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut window = Self::new();
        for tag in iter {
            window.record(tag);
        }
        window
    }
}

/// Behavioral and lifecycle context the ranker scores services against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub entity_age_days: u32,
    pub recent_view_signals: SignalWindow,
    pub historical_action_patterns: Vec<String>,
    pub is_dissolved: bool,
}

impl UserContext {
    /// Derives ranking context from an entity snapshot plus the stored
    /// behavioral history, pinned to `as_of`.
    pub fn for_entity(
        snapshot: &EntitySnapshot,
        recent_view_signals: SignalWindow,
        historical_action_patterns: Vec<String>,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            entity_age_days: snapshot.age_days(as_of),
            recent_view_signals,
            historical_action_patterns,
            is_dissolved: snapshot.is_dissolved(),
        }
    }
}
