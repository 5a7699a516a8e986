use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::compliance::catalog::{RankedService, ServiceCatalog};
use crate::workflows::compliance::domain::{EntityId, EntitySnapshot, EntityVertical};
use crate::workflows::compliance::health::HealthEvaluator;
use crate::workflows::compliance::infra::InMemoryEntityRepository;
use crate::workflows::compliance::intake::EntityRow;
use crate::workflows::compliance::relevance::{RelevanceRanker, SignalWindow, UserContext};
use crate::workflows::compliance::repository::{
    AlertDispatcher, ComplianceAlertEvent, DispatchError, EntityRecord, EntityRepository,
    RepositoryError,
};
use crate::workflows::compliance::service::ComplianceService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn snapshot(id: &str) -> EntitySnapshot {
    EntitySnapshot {
        id: EntityId(id.to_string()),
        name: "Prairie Holdings LLC".to_string(),
        formation_date: Some(date(2024, 1, 10)),
        license_expiry: None,
        has_registered_agent_service: true,
        has_named_agent: false,
        status: "Active".to_string(),
        vertical: EntityVertical::General,
        created_at: Some(date(2024, 1, 10)),
        last_filed_year: None,
    }
}

pub(super) fn row(id: &str) -> EntityRow {
    EntityRow {
        id: id.to_string(),
        name: "Prairie Holdings LLC".to_string(),
        formation_date: Some("2024-01-10".to_string()),
        license_expiry: None,
        has_registered_agent_service: true,
        has_named_agent: false,
        status: "Active".to_string(),
        vertical: None,
        created_at: Some("2024-01-10".to_string()),
        last_filed_year: None,
    }
}

pub(super) fn evaluator() -> HealthEvaluator {
    HealthEvaluator::default()
}

pub(super) fn ranker() -> RelevanceRanker {
    RelevanceRanker::default()
}

pub(super) fn catalog() -> ServiceCatalog {
    ServiceCatalog::standard()
}

pub(super) fn neutral_context() -> UserContext {
    UserContext {
        entity_age_days: 400,
        recent_view_signals: SignalWindow::new(),
        historical_action_patterns: Vec::new(),
        is_dissolved: false,
    }
}

pub(super) fn score_of(ranked: &[RankedService], id: &str) -> i64 {
    ranked
        .iter()
        .find(|entry| entry.service.id == id)
        .unwrap_or_else(|| panic!("service {id} missing from ranking"))
        .relevance_score
}

#[derive(Default)]
pub(super) struct MemoryDispatcher {
    events: Mutex<Vec<ComplianceAlertEvent>>,
}

impl MemoryDispatcher {
    pub(super) fn events(&self) -> Vec<ComplianceAlertEvent> {
        self.events.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl AlertDispatcher for MemoryDispatcher {
    fn dispatch(&self, event: ComplianceAlertEvent) -> Result<(), DispatchError> {
        self.events
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl EntityRepository for UnavailableRepository {
    fn insert(&self, _record: EntityRecord) -> Result<EntityRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EntityRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EntityId) -> Result<Option<EntityRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _limit: usize) -> Result<Vec<EntityRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ComplianceService<InMemoryEntityRepository, MemoryDispatcher>,
    Arc<InMemoryEntityRepository>,
    Arc<MemoryDispatcher>,
) {
    let repository = Arc::new(InMemoryEntityRepository::default());
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let service = ComplianceService::new(repository.clone(), dispatcher.clone(), catalog());
    (service, repository, dispatcher)
}
