//! Wizard session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                 - Start a session at the first step
//! - GET    /api/v1/sessions/{id}            - Render the current phase
//! - DELETE /api/v1/sessions/{id}            - Drop a session
//! - POST   /api/v1/sessions/{id}/next       - Submit the current step
//! - POST   /api/v1/sessions/{id}/back       - Go back
//! - POST   /api/v1/sessions/{id}/template   - Apply a named template
//! - POST   /api/v1/sessions/{id}/predict    - Run the prediction
//! - POST   /api/v1/sessions/{id}/reset      - Clear the form, back to step one

use std::collections::BTreeMap;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use floodwise_core::template::apply_template as apply_named_template;
use floodwise_core::wizard::{ReviewSection, StepView, WizardExt};
use floodwise_types::form::FormState;
use floodwise_types::prediction::PredictionResult;
use floodwise_types::wizard::{SessionState, WizardPhase};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for submitting a step.
#[derive(Debug, Deserialize)]
pub struct NextRequest {
    /// Feature column name -> score. Omitted features keep their displayed value.
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// Request body for applying a template.
#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub name: String,
}

/// Why the prediction panel could not be rendered.
#[derive(Debug, Serialize)]
pub struct PredictionFailure {
    pub code: &'static str,
    pub message: String,
}

/// Everything a client needs to render a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub phase: WizardPhase,
    pub progress: f64,
    /// Current step, while editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<StepView>,
    /// Review table, once all steps are filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Vec<ReviewSection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_error: Option<PredictionFailure>,
}

/// Response for the template endpoint.
#[derive(Debug, Serialize)]
pub struct TemplateApplied {
    /// False when the name was unknown; the session is then unchanged.
    pub applied: bool,
    pub session: SessionView,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// Run `f` against one live session and return a snapshot.
///
/// Unknown and idle-expired sessions are both reported as not found.
fn update_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut SessionState) -> R,
) -> Result<(R, SessionState), AppError> {
    state
        .sessions
        .update(id, f)
        .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
}

/// Score a form on the blocking pool; model loading touches the filesystem.
async fn run_prediction(state: &AppState, form: FormState) -> Result<PredictionResult, AppError> {
    let adapter = state.adapter.clone();
    tokio::task::spawn_blocking(move || adapter.predict(&form))
        .await
        .map_err(|e| AppError::Internal(format!("prediction task failed: {e}")))?
        .map_err(AppError::from)
}

fn base_view(id: Uuid, session: &SessionState) -> SessionView {
    let editing = session.step_view();
    let review = editing.is_none().then(|| session.review());
    SessionView {
        session_id: id,
        phase: session.phase,
        progress: session.progress(),
        editing,
        review,
        prediction: None,
        prediction_error: None,
    }
}

/// Render a session, re-running the prediction when it is in the result phase.
async fn render(state: &AppState, id: Uuid, session: SessionState) -> SessionView {
    let mut view = base_view(id, &session);
    if session.phase == WizardPhase::Predicted {
        match run_prediction(state, session.form).await {
            Ok(result) => view.prediction = Some(result),
            Err(e) => {
                let (_, code) = e.status_and_code();
                view.prediction_error = Some(PredictionFailure {
                    code,
                    message: e.message(),
                });
            }
        }
    }
    view
}

fn respond(view: SessionView, start: Instant) -> Json<ApiResponse<SessionView>> {
    let href = format!("/api/v1/sessions/{}", view.session_id);
    Json(ApiResponse::timed(view, start).with_link("self", &href))
}

/// POST /api/v1/sessions - Start a new session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let (id, session) = state.sessions.create();

    tracing::info!(session_id = %id, "session created");
    Ok(respond(base_view(id, &session), start))
}

/// GET /api/v1/sessions/{id} - Render the current phase.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (_, session) = update_session(&state, id, |_| ())?;

    let view = render(&state, id, session).await;
    Ok(respond(view, start))
}

/// DELETE /api/v1/sessions/{id} - Drop a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    if !state.sessions.remove(id) {
        return Err(AppError::SessionNotFound(id.to_string()));
    }

    tracing::info!(session_id = %id, "session deleted");
    Ok(Json(ApiResponse::timed(
        serde_json::json!({ "deleted": true, "session_id": id }),
        start,
    )))
}

/// POST /api/v1/sessions/{id}/next - Save the current step and advance.
pub async fn next_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<NextRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (result, session) = update_session(&state, id, |s| s.submit_step(&body.values))?;
    result?;

    Ok(respond(base_view(id, &session), start))
}

/// POST /api/v1/sessions/{id}/back - Go back one step (or to step one from review).
pub async fn go_back(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (result, session) = update_session(&state, id, |s| s.go_back())?;
    result?;

    Ok(respond(base_view(id, &session), start))
}

/// POST /api/v1/sessions/{id}/template - Replace the form with a template.
///
/// Unknown names are not an error: the response reports `applied: false`.
pub async fn apply_template(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<TemplateRequest>,
) -> Result<Json<ApiResponse<TemplateApplied>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (applied, session) = update_session(&state, id, |s| apply_named_template(s, &body.name))?;

    let data = TemplateApplied {
        applied,
        session: base_view(id, &session),
    };
    Ok(Json(ApiResponse::timed(data, start)))
}

/// POST /api/v1/sessions/{id}/predict - Enter the result phase and score the form.
///
/// A failed prediction leaves the session in the result phase; the client
/// can retry or reset.
pub async fn predict(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (result, session) = update_session(&state, id, |s| s.begin_prediction())?;
    result?;

    let prediction = run_prediction(&state, session.form.clone()).await?;
    let mut view = base_view(id, &session);
    view.prediction = Some(prediction);
    Ok(respond(view, start))
}

/// POST /api/v1/sessions/{id}/reset - Clear all state.
pub async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;
    let (_, session) = update_session(&state, id, |s| s.reset())?;

    tracing::info!(session_id = %id, "session reset");
    Ok(respond(base_view(id, &session), start))
}
