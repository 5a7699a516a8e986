use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for tracked entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Regulated vertical for an entity, selecting the licensing authority used
/// in renewal links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityVertical {
    #[default]
    General,
    Medical,
}

impl EntityVertical {
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Medical => "Medical",
        }
    }
}

/// Validated point-in-time view of an entity's statutory facts.
///
/// Snapshots are value objects: evaluation never mutates them, and callers
/// own the clock (`as_of`) so results are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub formation_date: Option<NaiveDate>,
    pub license_expiry: Option<NaiveDate>,
    pub has_registered_agent_service: bool,
    pub has_named_agent: bool,
    pub status: String,
    pub vertical: EntityVertical,
    pub created_at: Option<NaiveDate>,
    pub last_filed_year: Option<i32>,
}

impl EntitySnapshot {
    /// Registered-agent coverage is satisfied by either a purchased agent
    /// service or a self-named agent.
    pub fn has_agent_coverage(&self) -> bool {
        self.has_registered_agent_service || self.has_named_agent
    }

    /// An entity is treated as dissolved when its free-form status mentions
    /// dissolution, regardless of casing.
    pub fn is_dissolved(&self) -> bool {
        self.status.to_ascii_lowercase().contains("dissolved")
    }

    /// Whole days since `created_at`, clamped to zero. Entities without a
    /// recorded creation date are treated as created on `as_of`.
    pub fn age_days(&self, as_of: NaiveDate) -> u32 {
        self.created_at
            .map(|created| (as_of - created).num_days().max(0) as u32)
            .unwrap_or(0)
    }
}

/// Statutory annual-report deadline for a filing year: May 1.
pub(crate) fn annual_report_deadline(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 5, 1).expect("valid calendar date")
}

/// Whole days from `as_of` until the current year's annual-report deadline.
/// Negative once the deadline has passed.
pub(crate) fn days_until_annual_deadline(as_of: NaiveDate) -> i64 {
    (annual_report_deadline(as_of.year()) - as_of).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Call-to-action tag attached to an alert so the caller can route the user
/// to the matching remediation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    AnnualReport,
    Reinstatement,
    LicenseRenewal,
    StatementOfChange,
}

impl AlertAction {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::AnnualReport => "annual_report",
            Self::Reinstatement => "reinstatement",
            Self::LicenseRenewal => "license_renewal",
            Self::StatementOfChange => "statement_of_change",
        }
    }
}

/// A single finding produced by the health evaluator. Alerts are rebuilt on
/// every evaluation; deduplication across evaluations belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub title: String,
    pub body: String,
    pub action: AlertAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Traffic-light tier derived from the final health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorColor {
    Green,
    Amber,
    Red,
}

impl IndicatorColor {
    pub const fn from_score(score: u8) -> Self {
        if score >= 85 {
            Self::Green
        } else if score >= 50 {
            Self::Amber
        } else {
            Self::Red
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Amber => "Amber",
            Self::Red => "Red",
        }
    }
}

/// Composite output of a health evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResult {
    pub score: u8,
    pub alerts: Vec<Alert>,
    pub indicator: IndicatorColor,
}
