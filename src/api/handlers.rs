//! HTTP request handlers

use super::types::{
    CatalogResponse, DispatchResponse, ErrorResponse, LocationRequest, SearchRequest,
    SessionView, SuccessResponse, SymptomsRequest,
};
use super::AppState;
use crate::runtime::{dispatch_detached, DispatchError, SessionHandle};
use crate::state_machine::{Event, Symptom};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        // User actions
        .route("/api/sessions/:id/render", post(render_session))
        .route("/api/sessions/:id/symptoms", post(submit_symptoms))
        .route("/api/sessions/:id/search", post(answer_search))
        .route("/api/sessions/:id/location", post(submit_location))
        .route("/api/sessions/:id/reset", post(reset_session))
        // Static data
        .route("/api/catalog", get(get_catalog))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(State(state): State<AppState>) -> Result<Json<DispatchResponse>, AppError> {
    let handle = state.sessions.create().await;
    respond(&handle, vec![Event::Render]).await
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::session_not_found(&id))?;
    let runtime = handle.lock().await;

    Ok(Json(SessionView::from_runtime(&*runtime)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if state.sessions.remove(&id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::session_not_found(&id))
    }
}

// ============================================================
// User Actions
// ============================================================

async fn render_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DispatchResponse>, AppError> {
    send_events(&state, &id, vec![Event::Render]).await
}

async fn submit_symptoms(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SymptomsRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let event = Event::SubmitSymptoms {
        symptoms: req.symptoms,
    };
    send_events(&state, &id, vec![event]).await
}

async fn answer_search(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let event = Event::AnswerSearch { search: req.search };
    send_events(&state, &id, vec![event]).await
}

async fn submit_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let event = Event::SubmitLocation {
        location: req.location,
    };
    send_events(&state, &id, vec![event]).await
}

/// Start over; the greeting is rendered right away
async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DispatchResponse>, AppError> {
    send_events(&state, &id, vec![Event::Reset, Event::Render]).await
}

async fn send_events(
    state: &AppState,
    id: &str,
    events: Vec<Event>,
) -> Result<Json<DispatchResponse>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::session_not_found(id))?;
    respond(&handle, events).await
}

/// Apply the batch on a detached task so a dropped request cannot strand a
/// session mid-lookup
async fn respond(
    handle: &SessionHandle,
    events: Vec<Event>,
) -> Result<Json<DispatchResponse>, AppError> {
    let response = dispatch_detached(handle, events, |runtime, dispatch| {
        DispatchResponse::new(runtime, dispatch)
    })
    .await?;

    Ok(Json(response))
}

// ============================================================
// Static Data
// ============================================================

async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        symptoms: Symptom::labels(),
    })
}

async fn get_version() -> &'static str {
    concat!("aceso ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn session_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Session {id} not found"))
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Rejected(e) => AppError::Conflict(e.to_string()),
            DispatchError::TaskFailed(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
