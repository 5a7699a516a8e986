use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{EntityId, EntitySnapshot, EntityVertical};

/// Raw entity row as delivered by the persistence layer: string dates,
/// free-form vertical, nothing validated yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub formation_date: Option<String>,
    #[serde(default)]
    pub license_expiry: Option<String>,
    #[serde(default)]
    pub has_registered_agent_service: bool,
    #[serde(default)]
    pub has_named_agent: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_filed_year: Option<i32>,
}

/// Validation errors raised while converting raw rows into snapshots.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("entity row is missing an id or display name")]
    MissingIdentity,
    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("unknown vertical '{0}'")]
    UnknownVertical(String),
}

/// Guard responsible for producing validated `EntitySnapshot` values.
///
/// All date parsing happens here so the evaluators can assume well-formed
/// value objects; a present-but-unparseable date is an input-contract
/// violation surfaced as `IntakeError::InvalidDate`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotGuard;

impl SnapshotGuard {
    pub fn snapshot_from_row(&self, row: EntityRow) -> Result<EntitySnapshot, IntakeError> {
        if row.id.trim().is_empty() || row.name.trim().is_empty() {
            return Err(IntakeError::MissingIdentity);
        }

        let formation_date = parse_optional_date("formation_date", row.formation_date.as_deref())?;
        let license_expiry = parse_optional_date("license_expiry", row.license_expiry.as_deref())?;
        let created_at = parse_optional_date("created_at", row.created_at.as_deref())?;
        let vertical = parse_vertical(row.vertical.as_deref())?;

        Ok(EntitySnapshot {
            id: EntityId(row.id),
            name: row.name,
            formation_date,
            license_expiry,
            has_registered_agent_service: row.has_registered_agent_service,
            has_named_agent: row.has_named_agent,
            status: row.status,
            vertical,
            created_at,
            last_filed_year: row.last_filed_year,
        })
    }
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, IntakeError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|source| IntakeError::InvalidDate {
            field,
            value: raw.to_string(),
            source,
        })
}

fn parse_vertical(value: Option<&str>) -> Result<EntityVertical, IntakeError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(EntityVertical::General);
    };

    match raw.to_ascii_lowercase().as_str() {
        "general" => Ok(EntityVertical::General),
        "medical" | "healthcare" => Ok(EntityVertical::Medical),
        _ => Err(IntakeError::UnknownVertical(raw.to_string())),
    }
}
