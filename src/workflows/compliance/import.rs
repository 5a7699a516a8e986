use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::catalog::{ServiceCatalog, ServiceCatalogEntry, ServiceCategory};

/// Errors raised while loading a service catalog from CSV.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog row: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown service category '{value}' for service '{id}'")]
    UnknownCategory { id: String, value: String },
    #[error("invalid base fee '{value}' for service '{id}'")]
    InvalidFee { id: String, value: String },
}

/// Loads catalog entries from the merchandising team's CSV export.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<ServiceCatalog, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ServiceCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            entries.push(row.into_entry()?);
        }

        Ok(ServiceCatalog::from_entries(entries))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Service ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Base Fee (USD)")]
    base_fee: String,
    #[serde(rename = "Link", default, deserialize_with = "empty_string_as_none")]
    href: Option<String>,
    #[serde(
        rename = "Complexity",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    complexity: Option<String>,
    #[serde(rename = "Premium", default)]
    premium: String,
}

impl CatalogRow {
    fn into_entry(self) -> Result<ServiceCatalogEntry, CatalogImportError> {
        let category = parse_category(&self.category).ok_or_else(|| {
            CatalogImportError::UnknownCategory {
                id: self.id.clone(),
                value: self.category.clone(),
            }
        })?;

        let base_fee_cents =
            parse_fee_cents(&self.base_fee).ok_or_else(|| CatalogImportError::InvalidFee {
                id: self.id.clone(),
                value: self.base_fee.clone(),
            })?;

        let is_premium = matches!(
            self.premium.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        );

        Ok(ServiceCatalogEntry {
            id: self.id,
            name: self.name,
            description: self.description,
            base_fee_cents,
            category,
            action: self.action,
            href: self.href,
            complexity: self.complexity,
            is_premium,
        })
    }
}

fn parse_category(value: &str) -> Option<ServiceCategory> {
    match value.trim().to_ascii_lowercase().as_str() {
        "formation" => Some(ServiceCategory::Formation),
        "compliance" => Some(ServiceCategory::Compliance),
        "verification" => Some(ServiceCategory::Verification),
        "agent" | "registered agent" => Some(ServiceCategory::Agent),
        "succession" => Some(ServiceCategory::Succession),
        _ => None,
    }
}

/// Parses a dollar amount such as `149`, `149.5`, or `$149.00` into cents
/// without going through floating point.
fn parse_fee_cents(value: &str) -> Option<u32> {
    let trimmed = value.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return None;
    }

    let (dollars, cents) = match trimmed.split_once('.') {
        Some((dollars, cents)) => (dollars, cents),
        None => (trimmed, ""),
    };

    if cents.len() > 2 || !cents.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let dollars: u32 = dollars.parse().ok()?;
    let cents: u32 = if cents.is_empty() {
        0
    } else {
        let parsed: u32 = cents.parse().ok()?;
        if cents.len() == 1 {
            parsed * 10
        } else {
            parsed
        }
    };

    dollars.checked_mul(100)?.checked_add(cents)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
