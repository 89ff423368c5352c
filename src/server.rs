//! HTTP front end: the input form, the form processor, and a JSON API.

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::GradeConfig;
use crate::handler::{Outcome, handle_submission};
use crate::output::Renderer;

/// Immutable state shared by every request.
struct AppState {
    config: GradeConfig,
    renderer: Renderer,
}

/// JSON submission. Grades may be sent as strings or numbers.
#[derive(Debug, Deserialize)]
struct SubmissionRequest {
    #[serde(default)]
    names: Vec<Value>,
    #[serde(default)]
    grades: Vec<Value>,
}

/// Builds the application router.
pub fn router(config: GradeConfig) -> Result<Router> {
    let state = Arc::new(AppState {
        config,
        renderer: Renderer::new()?,
    });

    Ok(Router::new()
        .route("/", get(index))
        .route("/process", post(process_form))
        .route("/api/report", post(api_report))
        .route("/health", get(health))
        .with_state(state))
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: &str, config: GradeConfig) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, config).await
}

/// Serves on an already bound listener.
pub async fn serve_on(listener: TcpListener, config: GradeConfig) -> Result<()> {
    let app = router(config)?;
    info!(addr = %listener.local_addr()?, "Grade roster server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    match state.renderer.render_form(&state.config) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

#[tracing::instrument(skip_all, fields(bytes = body.len()))]
async fn process_form(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let (names, grades) = parse_form(&body);
    let outcome = handle_submission(&names, &grades, &state.config);

    match state.renderer.render_outcome(&outcome) {
        Ok(html) => (status_of(&outcome), Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn api_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmissionRequest>,
) -> (StatusCode, Json<Outcome>) {
    let names: Vec<String> = request.names.iter().map(field_text).collect();
    let grades: Vec<String> = request.grades.iter().map(field_text).collect();

    let outcome = handle_submission(&names, &grades, &state.config);
    (status_of(&outcome), Json(outcome))
}

/// Splits a url-encoded body into the parallel name and grade lists.
/// Both `names[]` and `names` keys are accepted.
fn parse_form(body: &[u8]) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut grades = Vec::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "names[]" | "names" => names.push(value.into_owned()),
            "grades[]" | "grades" => grades.push(value.into_owned()),
            _ => {}
        }
    }

    (names, grades)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn status_of(outcome: &Outcome) -> StatusCode {
    StatusCode::from_u16(outcome.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn render_failure(e: anyhow::Error) -> Response {
    error!(error = %e, "Template rendering failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
