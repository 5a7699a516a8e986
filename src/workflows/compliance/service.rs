use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::catalog::{RankedService, ServiceCatalog};
use super::domain::{AlertSeverity, EntityId, HealthResult};
use super::health::{HealthConfig, HealthEvaluator};
use super::intake::{EntityRow, IntakeError, SnapshotGuard};
use super::relevance::{RelevanceConfig, RelevanceRanker};
use super::repository::{
    AlertDispatcher, ComplianceAlertEvent, DispatchError, EntityRecord, EntityRepository,
    RepositoryError,
};

/// Service composing the intake guard, repository, evaluators, and catalog.
///
/// The evaluators themselves stay pure; this facade owns the storage and
/// notification side effects around them.
pub struct ComplianceService<R, A> {
    guard: SnapshotGuard,
    repository: Arc<R>,
    dispatcher: Arc<A>,
    evaluator: Arc<HealthEvaluator>,
    ranker: Arc<RelevanceRanker>,
    catalog: Arc<ServiceCatalog>,
}

impl<R, A> ComplianceService<R, A>
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    pub fn new(repository: Arc<R>, dispatcher: Arc<A>, catalog: ServiceCatalog) -> Self {
        Self::with_configs(
            repository,
            dispatcher,
            catalog,
            HealthConfig::default(),
            RelevanceConfig::default(),
        )
    }

    pub fn with_configs(
        repository: Arc<R>,
        dispatcher: Arc<A>,
        catalog: ServiceCatalog,
        health: HealthConfig,
        relevance: RelevanceConfig,
    ) -> Self {
        Self {
            guard: SnapshotGuard,
            repository,
            dispatcher,
            evaluator: Arc::new(HealthEvaluator::new(health)),
            ranker: Arc::new(RelevanceRanker::new(relevance)),
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Validate and store a new entity row, returning the stored record.
    pub fn register(&self, row: EntityRow) -> Result<EntityRecord, ComplianceServiceError> {
        let snapshot = self.guard.snapshot_from_row(row)?;
        let stored = self.repository.insert(EntityRecord::new(snapshot))?;
        Ok(stored)
    }

    /// Fetch a stored entity record.
    pub fn get(&self, id: &EntityId) -> Result<EntityRecord, ComplianceServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Evaluate an entity's compliance health as of the supplied date,
    /// dispatching an alert event for every critical finding.
    pub fn health(
        &self,
        id: &EntityId,
        as_of: NaiveDate,
    ) -> Result<HealthResult, ComplianceServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let result = self.evaluator.evaluate(&record.snapshot, as_of);

        for alert in result
            .alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
        {
            let mut details = BTreeMap::new();
            details.insert("score".to_string(), result.score.to_string());
            details.insert("as_of".to_string(), as_of.to_string());
            self.dispatcher.dispatch(ComplianceAlertEvent {
                entity_id: id.clone(),
                severity: alert.severity,
                title: alert.title.clone(),
                action: alert.action,
                details,
            })?;
        }

        Ok(result)
    }

    /// Rank the catalog for an entity's stored behavioral context.
    pub fn recommendations(
        &self,
        id: &EntityId,
        as_of: NaiveDate,
    ) -> Result<Vec<RankedService>, ComplianceServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let context = record.context(as_of);
        Ok(self.ranker.rank(self.catalog.entries(), &context, as_of))
    }

    /// Record a view signal feeding the behavioral-intent boost.
    pub fn record_view(&self, id: &EntityId, signal: &str) -> Result<(), ComplianceServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        record.recent_signals.record(signal);
        self.repository.update(record)?;
        Ok(())
    }

    /// Record an invoked service action feeding the repeat-action boost.
    /// Actions are kept distinct; recording a repeat is a no-op.
    pub fn record_action(&self, id: &EntityId, action: &str) -> Result<(), ComplianceServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        if !record.action_history.iter().any(|seen| seen == action) {
            record.action_history.push(action.to_string());
            self.repository.update(record)?;
        }
        Ok(())
    }
}

/// Error raised by the compliance service.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
