//! HTTP server exposing the summary, comparison and reload operations.
//! Not-found partners map to 404 with the error text; any other failure is
//! a generic 500 with the detail logged, not returned.

use crate::data::DataStore;
use crate::report::{self, ReportError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub struct AppState {
    pub store: Arc<DataStore>,
}

pub fn router(store: Arc<DataStore>) -> Router {
    let state = Arc::new(AppState { store });
    Router::new()
        .route("/test", get(test))
        .route("/summary/:partner_id", get(get_summary))
        .route("/compare/:partner_id", get(compare_partner))
        .route("/reload", post(reload))
        .route("/docs", get(docs))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until shutdown.
pub async fn run(store: Arc<DataStore>, addr: &str) -> anyhow::Result<()> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Every `ReportError` variant is a caller-facing unknown-partner case;
/// non-recoverable failures (loader, projector) surface through `/reload`
/// and map to a generic 500 there.
fn report_error_response(err: ReportError) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, err.to_string())
}

async fn test() -> &'static str {
    "Test route is working."
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(partner_id): Path<i64>,
) -> Result<String, (StatusCode, String)> {
    let snapshot = state.store.snapshot();
    report::build_summary(&snapshot, partner_id).map_err(report_error_response)
}

async fn compare_partner(
    State(state): State<Arc<AppState>>,
    Path(partner_id): Path<i64>,
) -> Result<String, (StatusCode, String)> {
    let snapshot = state.store.snapshot();
    report::build_comparison(&snapshot, partner_id).map_err(report_error_response)
}

async fn reload(
    State(state): State<Arc<AppState>>,
) -> Result<String, (StatusCode, String)> {
    match state.store.reload() {
        Ok(()) => Ok("Data reloaded successfully.".to_string()),
        Err(e) => {
            error!("error reloading data: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reloading data.".to_string(),
            ))
        }
    }
}

async fn docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "routes": [
            {"route": "/test", "method": "GET", "description": "Liveness check."},
            {"route": "/summary/{partner_id}", "method": "GET", "description": "Generate a summary for a specific partner ID."},
            {"route": "/compare/{partner_id}", "method": "GET", "description": "Provide comparison statistics for a specific partner ID."},
            {"route": "/reload", "method": "POST", "description": "Reload the source CSV data."},
            {"route": "/docs", "method": "GET", "description": "Describe the available routes."}
        ]
    }))
}
