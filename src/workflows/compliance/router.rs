use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::EntityId;
use super::intake::EntityRow;
use super::repository::{AlertDispatcher, EntityRepository, RepositoryError};
use super::service::{ComplianceService, ComplianceServiceError};

/// Router builder exposing HTTP endpoints for entity intake, health
/// evaluation, and service recommendations.
pub fn compliance_router<R, A>(service: Arc<ComplianceService<R, A>>) -> Router
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/entities", post(register_handler::<R, A>))
        .route(
            "/api/v1/entities/:entity_id/health",
            get(health_handler::<R, A>),
        )
        .route(
            "/api/v1/entities/:entity_id/services",
            get(services_handler::<R, A>),
        )
        .route(
            "/api/v1/entities/:entity_id/signals",
            post(signal_handler::<R, A>),
        )
        .route(
            "/api/v1/entities/:entity_id/actions",
            post(action_handler::<R, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct AsOfQuery {
    #[serde(default)]
    as_of: Option<String>,
}

impl AsOfQuery {
    /// Resolves the evaluation clock, defaulting to today when the caller
    /// does not pin one.
    fn resolve(&self) -> Result<NaiveDate, Response> {
        let Some(raw) = self.as_of.as_deref() else {
            return Ok(Local::now().date_naive());
        };

        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            let payload = json!({
                "error": format!("invalid as_of '{raw}': expected YYYY-MM-DD"),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        })
    }
}

#[derive(Debug, Deserialize)]
struct SignalRequest {
    signal: String,
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    action: String,
}

pub(crate) async fn register_handler<R, A>(
    State(service): State<Arc<ComplianceService<R, A>>>,
    axum::Json(row): axum::Json<EntityRow>,
) -> Response
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    match service.register(row) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn health_handler<R, A>(
    State(service): State<Arc<ComplianceService<R, A>>>,
    Path(entity_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    let as_of = match query.resolve() {
        Ok(date) => date,
        Err(response) => return response,
    };

    match service.health(&EntityId(entity_id), as_of) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn services_handler<R, A>(
    State(service): State<Arc<ComplianceService<R, A>>>,
    Path(entity_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    let as_of = match query.resolve() {
        Ok(date) => date,
        Err(response) => return response,
    };

    match service.recommendations(&EntityId(entity_id), as_of) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn signal_handler<R, A>(
    State(service): State<Arc<ComplianceService<R, A>>>,
    Path(entity_id): Path<String>,
    axum::Json(request): axum::Json<SignalRequest>,
) -> Response
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    match service.record_view(&EntityId(entity_id), &request.signal) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn action_handler<R, A>(
    State(service): State<Arc<ComplianceService<R, A>>>,
    Path(entity_id): Path<String>,
    axum::Json(request): axum::Json<ActionRequest>,
) -> Response
where
    R: EntityRepository + 'static,
    A: AlertDispatcher + 'static,
{
    match service.record_action(&EntityId(entity_id), &request.action) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ComplianceServiceError) -> Response {
    let status = match &error {
        ComplianceServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ComplianceServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ComplianceServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ComplianceServiceError::Repository(RepositoryError::Unavailable(_))
        | ComplianceServiceError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
