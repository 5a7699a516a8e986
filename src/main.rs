use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use charter_compliance::config::AppConfig;
use charter_compliance::error::AppError;
use charter_compliance::telemetry;
use charter_compliance::workflows::compliance::{
    compliance_router, CatalogImporter, ComplianceService, EntityRow, EntitySnapshot,
    HealthEvaluator, HealthResult, InMemoryEntityRepository, RankedService, RelevanceRanker,
    ServiceCatalog, SignalWindow, SnapshotGuard, TracingAlertDispatcher, UserContext,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Charter Compliance Engine",
    about = "Score entity compliance health and rank remediation services",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate an entity's compliance health from the command line
    Health(HealthArgs),
    /// Rank the service catalog for a user context from the command line
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct HealthArgs {
    /// Entity identifier used in the rendered report
    #[arg(long, default_value = "demo-entity")]
    id: String,
    /// Entity display name
    #[arg(long, default_value = "Demo Entity LLC")]
    name: String,
    /// Formation date (YYYY-MM-DD); omit for entities with nothing on file
    #[arg(long)]
    formation_date: Option<String>,
    /// Professional license expiry (YYYY-MM-DD)
    #[arg(long)]
    license_expiry: Option<String>,
    /// Entity status string, e.g. Active or Administratively Dissolved
    #[arg(long, default_value = "Active")]
    status: String,
    /// Regulated vertical: general or medical
    #[arg(long)]
    vertical: Option<String>,
    /// Entity has a purchased registered-agent service
    #[arg(long)]
    registered_agent_service: bool,
    /// Entity has a self-named registered agent
    #[arg(long)]
    named_agent: bool,
    /// Record creation date (YYYY-MM-DD), used to derive entity age
    #[arg(long)]
    created: Option<String>,
    /// Year of the most recent annual report filing
    #[arg(long)]
    last_filed_year: Option<i32>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Optional service catalog CSV (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Entity status string used to derive dissolution
    #[arg(long, default_value = "Active")]
    status: String,
    /// Record creation date (YYYY-MM-DD), used to derive entity age
    #[arg(long)]
    created: Option<String>,
    /// Recent view-signal tags, comma separated
    #[arg(long, value_delimiter = ',')]
    signals: Vec<String>,
    /// Previously invoked service actions, comma separated
    #[arg(long, value_delimiter = ',')]
    history: Vec<String>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ComplianceReportRequest {
    entity: EntityRow,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    as_of: Option<NaiveDate>,
    #[serde(default = "default_true")]
    include_recommendations: bool,
}

#[derive(Debug, Serialize)]
struct ComplianceReportResponse {
    entity_id: String,
    as_of: NaiveDate,
    health: HealthResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<Vec<RankedService>>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Health(args) => run_health_report(args),
        Command::Recommend(args) => run_recommendations(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

const fn default_true() -> bool {
    true
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = match &config.catalog.path {
        Some(path) => CatalogImporter::from_path(path)?,
        None => ServiceCatalog::standard(),
    };

    let repository = Arc::new(InMemoryEntityRepository::default());
    let dispatcher = Arc::new(TracingAlertDispatcher);
    let service = Arc::new(ComplianceService::new(repository, dispatcher, catalog));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/compliance/report", post(compliance_report_endpoint))
        .with_state(state)
        .merge(compliance_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compliance engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_health_report(args: HealthArgs) -> Result<(), AppError> {
    let HealthArgs {
        id,
        name,
        formation_date,
        license_expiry,
        status,
        vertical,
        registered_agent_service,
        named_agent,
        created,
        last_filed_year,
        as_of,
    } = args;

    let guard = SnapshotGuard;
    let snapshot = guard.snapshot_from_row(EntityRow {
        id,
        name,
        formation_date,
        license_expiry,
        has_registered_agent_service: registered_agent_service,
        has_named_agent: named_agent,
        status,
        vertical,
        created_at: created,
        last_filed_year,
    })?;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let result = HealthEvaluator::default().evaluate(&snapshot, as_of);
    render_health_report(&snapshot, &result, as_of);

    Ok(())
}

fn run_recommendations(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        catalog,
        status,
        created,
        signals,
        history,
        as_of,
    } = args;

    let catalog = match catalog {
        Some(path) => CatalogImporter::from_path(path)?,
        None => ServiceCatalog::standard(),
    };

    let guard = SnapshotGuard;
    let snapshot = guard.snapshot_from_row(EntityRow {
        id: "cli-entity".to_string(),
        name: "CLI Entity".to_string(),
        formation_date: None,
        license_expiry: None,
        has_registered_agent_service: true,
        has_named_agent: false,
        status,
        vertical: None,
        created_at: created,
        last_filed_year: None,
    })?;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let window: SignalWindow = signals.into_iter().collect();
    let context = UserContext::for_entity(&snapshot, window, history, as_of);
    let ranked = RelevanceRanker::default().rank(catalog.entries(), &context, as_of);
    render_recommendations(&ranked, as_of);

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless evaluation endpoint for callers that keep their own entity
/// storage: the full snapshot arrives in the payload and nothing is
/// persisted server side.
async fn compliance_report_endpoint(
    Json(payload): Json<ComplianceReportRequest>,
) -> Result<Json<ComplianceReportResponse>, AppError> {
    let ComplianceReportRequest {
        entity,
        as_of,
        include_recommendations,
    } = payload;

    let guard = SnapshotGuard;
    let snapshot = guard.snapshot_from_row(entity)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let health = HealthEvaluator::default().evaluate(&snapshot, as_of);

    let recommendations = if include_recommendations {
        let catalog = ServiceCatalog::standard();
        let context = UserContext::for_entity(&snapshot, SignalWindow::new(), Vec::new(), as_of);
        Some(RelevanceRanker::default().rank(catalog.entries(), &context, as_of))
    } else {
        None
    };

    Ok(Json(ComplianceReportResponse {
        entity_id: snapshot.id.0,
        as_of,
        health,
        recommendations,
    }))
}

fn render_health_report(snapshot: &EntitySnapshot, result: &HealthResult, as_of: NaiveDate) {
    println!("Compliance health report");
    println!(
        "Entity: {} ({}), evaluated {}",
        snapshot.name, snapshot.id, as_of
    );
    println!(
        "Score: {}/100 [{}]",
        result.score,
        result.indicator.label()
    );

    if result.alerts.is_empty() {
        println!("\nAlerts: none");
        return;
    }

    println!("\nAlerts");
    for alert in &result.alerts {
        println!(
            "- [{}] {}: {} (action: {})",
            alert.severity.label(),
            alert.title,
            alert.body,
            alert.action.tag()
        );
        if let Some(link) = &alert.link {
            println!("  renew at {link}");
        }
    }
}

fn render_recommendations(ranked: &[RankedService], as_of: NaiveDate) {
    println!("Service recommendations (evaluated {as_of})");

    if ranked.is_empty() {
        println!("Catalog is empty; nothing to rank.");
        return;
    }

    for entry in ranked {
        let premium = if entry.service.is_premium {
            " [premium]"
        } else {
            ""
        };
        println!(
            "- {:>5} | {} ({}){} | ${}.{:02}",
            entry.relevance_score,
            entry.service.name,
            entry.service.category.label(),
            premium,
            entry.service.base_fee_cents / 100,
            entry.service.base_fee_cents % 100
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_row() -> EntityRow {
        EntityRow {
            id: "ent-100".to_string(),
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

    #[tokio::test]
    async fn compliance_report_endpoint_returns_health_and_ranking() {
        let request = ComplianceReportRequest {
            entity: demo_row(),
            as_of: Some(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")),
            include_recommendations: true,
        };

        let Json(body) = compliance_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.entity_id, "ent-100");
        assert_eq!(body.health.score, 80);
        let ranked = body.recommendations.expect("recommendations included");
        assert_eq!(ranked.len(), ServiceCatalog::standard().len());
    }

    #[tokio::test]
    async fn compliance_report_endpoint_can_skip_recommendations() {
        let request = ComplianceReportRequest {
            entity: demo_row(),
            as_of: Some(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")),
            include_recommendations: false,
        };

        let Json(body) = compliance_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.health.score, 40);
        assert!(body.recommendations.is_none());
    }
}
