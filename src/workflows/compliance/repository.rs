use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AlertAction, AlertSeverity, EntityId, EntitySnapshot};
use super::relevance::{SignalWindow, UserContext};

/// Repository record pairing an entity snapshot with its stored behavioral
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub snapshot: EntitySnapshot,
    pub recent_signals: SignalWindow,
    pub action_history: Vec<String>,
}

impl EntityRecord {
    pub fn new(snapshot: EntitySnapshot) -> Self {
        Self {
            snapshot,
            recent_signals: SignalWindow::new(),
            action_history: Vec::new(),
        }
    }

    /// Ranking context for this record as seen on `as_of`.
    pub fn context(&self, as_of: NaiveDate) -> UserContext {
        UserContext::for_entity(
            &self.snapshot,
            self.recent_signals.clone(),
            self.action_history.clone(),
            as_of,
        )
    }

    pub fn status_view(&self) -> EntityStatusView {
        EntityStatusView {
            entity_id: self.snapshot.id.clone(),
            name: self.snapshot.name.clone(),
            status: self.snapshot.status.clone(),
            vertical_label: self.snapshot.vertical.label(),
            recent_signal_count: self.recent_signals.len(),
            recorded_action_count: self.action_history.len(),
        }
    }
}

/// Sanitized representation of a stored entity for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EntityStatusView {
    pub entity_id: EntityId,
    pub name: String,
    pub status: String,
    pub vertical_label: &'static str,
    pub recent_signal_count: usize,
    pub recorded_action_count: usize,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EntityRepository: Send + Sync {
    fn insert(&self, record: EntityRecord) -> Result<EntityRecord, RepositoryError>;
    fn update(&self, record: EntityRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EntityId) -> Result<Option<EntityRecord>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<EntityRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook notifying downstream channels of critical findings.
pub trait AlertDispatcher: Send + Sync {
    fn dispatch(&self, event: ComplianceAlertEvent) -> Result<(), DispatchError>;
}

/// Alert payload handed to dispatchers when an evaluation produces a
/// critical finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceAlertEvent {
    pub entity_id: EntityId,
    pub severity: AlertSeverity,
    pub title: String,
    pub action: AlertAction,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
