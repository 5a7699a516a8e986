use serde::{Deserialize, Serialize};

/// Boost weights and window sizes for the relevance scorer.
///
/// The dissolution boost is intentionally large enough to dominate every
/// other signal combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceConfig {
    pub statutory_overdue_boost: i64,
    pub statutory_window_boost: i64,
    pub statutory_window_days: i64,
    pub correction_window_boost: i64,
    pub correction_window_days: u32,
    pub document_intent_boost: i64,
    pub repeat_action_boost: i64,
    pub dissolution_boost: i64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            statutory_overdue_boost: 150,
            statutory_window_boost: 100,
            statutory_window_days: 60,
            correction_window_boost: 80,
            correction_window_days: 15,
            document_intent_boost: 50,
            repeat_action_boost: 40,
            dissolution_boost: 1000,
        }
    }
}
