mod config;
mod rules;

pub use config::HealthConfig;

use chrono::NaiveDate;

use super::domain::{EntitySnapshot, HealthResult, IndicatorColor};

const BASE_SCORE: u32 = 100;

/// Stateless evaluator applying the statutory deadline rules to an entity
/// snapshot.
///
/// Evaluation is a pure function of `(snapshot, as_of)`: the clock is an
/// explicit input so results can be pinned in tests and callers may invoke
/// the evaluator concurrently without coordination.
#[derive(Debug, Clone, Default)]
pub struct HealthEvaluator {
    config: HealthConfig,
}

impl HealthEvaluator {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Computes the compliance health score and alert list for `snapshot`
    /// as seen on `as_of`.
    ///
    /// Entities without a formation date have nothing on file to track and
    /// short-circuit to a perfect score with no alerts.
    pub fn evaluate(&self, snapshot: &EntitySnapshot, as_of: NaiveDate) -> HealthResult {
        if snapshot.formation_date.is_none() {
            return HealthResult {
                score: BASE_SCORE as u8,
                alerts: Vec::new(),
                indicator: IndicatorColor::Green,
            };
        }

        let (deductions, alerts) = rules::run_rules(snapshot, as_of, &self.config);
        let score = BASE_SCORE.saturating_sub(deductions) as u8;

        HealthResult {
            score,
            alerts,
            indicator: IndicatorColor::from_score(score),
        }
    }
}
