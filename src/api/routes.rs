//! REST endpoints for email classification.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::error::ApiError;
use crate::pipeline::processor::{ClassifiedEmail, EmailProcessor};
use crate::store::traits::EmailRecord;

/// Shared state for the classification routes.
#[derive(Clone)]
pub struct ApiState {
    pub processor: Arc<EmailProcessor>,
}

/// Body of `POST /classify-email`.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Query of `GET /classify-email`.
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    pub id: Option<String>,
}

/// Build the Axum router with the classification REST routes.
pub fn classify_routes(processor: Arc<EmailProcessor>) -> Router {
    let state = ApiState { processor };

    Router::new()
        .route("/health", get(health))
        .route(
            "/classify-email",
            post(classify_email)
                .get(fetch_emails)
                .fallback(method_not_allowed),
        )
        .route("/classify-email/stuck", get(list_stuck))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

/// Permissive CORS: any origin, the methods and headers browser clients send.
///
/// The layer answers every OPTIONS request itself with 200 and no body.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "email-triage"
    }))
}

// ── Classification ──────────────────────────────────────────────────────

/// POST /classify-email
///
/// Classifies the submitted text and returns the stored record id with the
/// category, suggested reply and reasoning.
async fn classify_email(
    State(state): State<ApiState>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifiedEmail>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let content = request.content.unwrap_or_default();
    let classified = state.processor.process(&content, request.filename).await?;
    Ok(Json(classified))
}

/// GET /classify-email[?id=...]
///
/// With an id: that record, or `null`. Without: the most recent records.
async fn fetch_emails(
    State(state): State<ApiState>,
    Query(query): Query<FetchQuery>,
) -> Result<Response, ApiError> {
    match query.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            debug!(id = %id, "Fetching email");
            let record: Option<EmailRecord> = state.processor.get(&id).await?;
            Ok(Json(record).into_response())
        }
        None => {
            let records = state.processor.recent().await?;
            Ok(Json(records).into_response())
        }
    }
}

/// GET /classify-email/stuck
///
/// Records left in `processing` after a failed completion write.
async fn list_stuck(State(state): State<ApiState>) -> Result<Json<Vec<EmailRecord>>, ApiError> {
    Ok(Json(state.processor.stuck().await?))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
