use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use super::domain::EntityId;
use super::repository::{
    AlertDispatcher, ComplianceAlertEvent, DispatchError, EntityRecord, EntityRepository,
    RepositoryError,
};

/// Mutex-guarded map repository backing the demo server and tests.
#[derive(Debug, Default)]
pub struct InMemoryEntityRepository {
    records: Mutex<HashMap<EntityId, EntityRecord>>,
}

impl InMemoryEntityRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<EntityId, EntityRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))
    }
}

impl EntityRepository for InMemoryEntityRepository {
    fn insert(&self, record: EntityRecord) -> Result<EntityRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.snapshot.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.snapshot.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EntityRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert(record.snapshot.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EntityId) -> Result<Option<EntityRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<EntityRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut records: Vec<EntityRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.snapshot.id.0.cmp(&b.snapshot.id.0));
        records.truncate(limit);
        Ok(records)
    }
}

/// Dispatcher that surfaces critical findings through the tracing pipeline.
#[derive(Debug, Clone, Default)]
pub struct TracingAlertDispatcher;

impl AlertDispatcher for TracingAlertDispatcher {
    fn dispatch(&self, event: ComplianceAlertEvent) -> Result<(), DispatchError> {
        warn!(
            entity = %event.entity_id,
            severity = event.severity.label(),
            action = event.action.tag(),
            title = %event.title,
            "compliance alert dispatched"
        );
        Ok(())
    }
}
