use serde::{Deserialize, Serialize};

/// Merchandising category for an offerable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Formation,
    Compliance,
    Verification,
    Agent,
    Succession,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Formation => "Formation",
            Self::Compliance => "Compliance",
            Self::Verification => "Verification",
            Self::Agent => "Registered Agent",
            Self::Succession => "Succession",
        }
    }
}

/// A single offerable service. Catalog entries are static configuration
/// supplied by the caller, not derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_fee_cents: u32,
    pub category: ServiceCategory,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// A catalog entry paired with its computed relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedService {
    pub service: ServiceCatalogEntry,
    pub relevance_score: i64,
}

/// Ordered collection of offerable services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl ServiceCatalog {
    pub fn from_entries(entries: Vec<ServiceCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog the product ships with.
    pub fn standard() -> Self {
        Self::from_entries(vec![
            ServiceCatalogEntry {
                id: "annual-report".to_string(),
                name: "Annual Report Filing".to_string(),
                description: "Prepare and file the statutory annual report before the May 1 \
                              deadline."
                    .to_string(),
                base_fee_cents: 14_900,
                category: ServiceCategory::Compliance,
                action: "annual_report".to_string(),
                href: Some("/services/annual-report".to_string()),
                complexity: None,
                is_premium: false,
            },
            ServiceCatalogEntry {
                id: "reinstatement".to_string(),
                name: "Entity Reinstatement".to_string(),
                description: "Restore an administratively dissolved entity to good standing, \
                              including delinquent filings."
                    .to_string(),
                base_fee_cents: 39_900,
                category: ServiceCategory::Compliance,
                action: "reinstatement".to_string(),
                href: Some("/services/reinstatement".to_string()),
                complexity: Some("multi-step".to_string()),
                is_premium: true,
            },
            ServiceCatalogEntry {
                id: "statement-of-change".to_string(),
                name: "Registered Agent Statement of Change".to_string(),
                description: "Appoint or replace the registered agent on file with the state."
                    .to_string(),
                base_fee_cents: 9_900,
                category: ServiceCategory::Agent,
                action: "statement_of_change".to_string(),
                href: Some("/services/registered-agent".to_string()),
                complexity: None,
                is_premium: false,
            },
            ServiceCatalogEntry {
                id: "articles-of-correction".to_string(),
                name: "Articles of Correction".to_string(),
                description: "Correct errors in recently filed formation documents.".to_string(),
                base_fee_cents: 12_900,
                category: ServiceCategory::Formation,
                action: "correction".to_string(),
                href: Some("/services/correction".to_string()),
                complexity: None,
                is_premium: false,
            },
            ServiceCatalogEntry {
                id: "certified-copies".to_string(),
                name: "Certified Document Copies".to_string(),
                description: "Order state-certified copies of formation and amendment filings."
                    .to_string(),
                base_fee_cents: 7_900,
                category: ServiceCategory::Verification,
                action: "certified_copies".to_string(),
                href: Some("/services/certified-copies".to_string()),
                complexity: None,
                is_premium: false,
            },
            ServiceCatalogEntry {
                id: "good-standing".to_string(),
                name: "Certificate of Good Standing".to_string(),
                description: "Obtain a certificate evidencing the entity's active status."
                    .to_string(),
                base_fee_cents: 5_900,
                category: ServiceCategory::Verification,
                action: "good_standing".to_string(),
                href: Some("/services/good-standing".to_string()),
                complexity: None,
                is_premium: false,
            },
            ServiceCatalogEntry {
                id: "succession-blueprint".to_string(),
                name: "Succession Blueprint".to_string(),
                description: "Document ownership transfer instructions and heir access for the \
                              entity."
                    .to_string(),
                base_fee_cents: 79_900,
                category: ServiceCategory::Succession,
                action: "succession_plan".to_string(),
                href: Some("/services/succession".to_string()),
                complexity: Some("advisory".to_string()),
                is_premium: true,
            },
        ])
    }
}
