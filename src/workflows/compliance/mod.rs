//! Compliance health scoring and service relevance ranking.
//!
//! The two engines (`health::HealthEvaluator`, `relevance::RelevanceRanker`)
//! are pure functions over immutable snapshots with an explicit evaluation
//! clock. Storage, intake validation, notification, and HTTP wiring live in
//! the surrounding modules so the engines stay side-effect free.

pub mod catalog;
pub mod domain;
pub mod health;
pub mod import;
pub mod infra;
pub mod intake;
pub mod relevance;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{RankedService, ServiceCatalog, ServiceCatalogEntry, ServiceCategory};
pub use domain::{
    Alert, AlertAction, AlertSeverity, EntityId, EntitySnapshot, EntityVertical, HealthResult,
    IndicatorColor,
};
pub use health::{HealthConfig, HealthEvaluator};
pub use import::{CatalogImportError, CatalogImporter};
pub use infra::{InMemoryEntityRepository, TracingAlertDispatcher};
pub use intake::{EntityRow, IntakeError, SnapshotGuard};
pub use relevance::{RelevanceConfig, RelevanceRanker, SignalWindow, UserContext};
pub use repository::{
    AlertDispatcher, ComplianceAlertEvent, DispatchError, EntityRecord, EntityRepository,
    EntityStatusView, RepositoryError,
};
pub use router::compliance_router;
pub use service::{ComplianceService, ComplianceServiceError};
