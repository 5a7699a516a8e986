use chrono::NaiveDate;

use super::super::catalog::{ServiceCatalogEntry, ServiceCategory};
use super::super::domain::days_until_annual_deadline;
use super::config::RelevanceConfig;
use super::context::UserContext;

pub(crate) const ANNUAL_REPORT_ACTION: &str = "annual_report";
pub(crate) const CORRECTION_ACTION: &str = "correction";
pub(crate) const REINSTATEMENT_ACTION: &str = "reinstatement";
pub(crate) const DOCUMENTS_SIGNAL: &str = "documents";

/// Sums the relevance boosts a single service earns for this context.
/// Rules are additive except the statutory bands, which are alternatives.
pub(crate) fn relevance_score(
    service: &ServiceCatalogEntry,
    context: &UserContext,
    as_of: NaiveDate,
    config: &RelevanceConfig,
) -> i64 {
    let mut score = 0i64;

    if service.action.contains(ANNUAL_REPORT_ACTION) {
        let days_until_deadline = days_until_annual_deadline(as_of);
        if days_until_deadline <= 0 {
            score += config.statutory_overdue_boost;
        } else if days_until_deadline < config.statutory_window_days {
            score += config.statutory_window_boost;
        }
    }

    if service.action == CORRECTION_ACTION
        && context.entity_age_days < config.correction_window_days
    {
        score += config.correction_window_boost;
    }

    if service.category == ServiceCategory::Verification
        && context.recent_view_signals.contains(DOCUMENTS_SIGNAL)
    {
        score += config.document_intent_boost;
    }

    if context
        .historical_action_patterns
        .iter()
        .any(|action| action == &service.action)
    {
        score += config.repeat_action_boost;
    }

    if context.is_dissolved && service.action == REINSTATEMENT_ACTION {
        score += config.dissolution_boost;
    }

    score
}
