//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{error::SessionError, presenter::StepView, state::AppState};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, StepsResponse};

fn status_for(e: &SessionError) -> StatusCode {
    match e {
        SessionError::Finished => StatusCode::CONFLICT,
        SessionError::StepOutOfRange { .. } => StatusCode::NOT_FOUND,
        SessionError::EmptyRecipe
        | SessionError::DuplicateStepId(_)
        | SessionError::Poisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn summary_or_500(state: &AppState) -> Result<crate::state::SessionSummary, StatusCode> {
    state.summary().map_err(|e| {
        error!("Failed to get session summary: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /action - Press the primary action of the active step
pub async fn action_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.primary_action() {
        Ok(result) => {
            info!("Action endpoint called - {:?}", result);
            Ok(Json(ApiResponse::action(result, summary_or_500(&state)?)))
        }
        Err(e) => {
            warn!("Primary action rejected: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle POST /steps/:index/activate - Jump to a step (1-based)
pub async fn activate_handler(
    State(state): State<Arc<AppState>>,
    Path(number): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(index) = number.checked_sub(1) else {
        return Err(StatusCode::NOT_FOUND);
    };

    match state.go_to(index) {
        Ok(()) => {
            info!("Activate endpoint called - step {}", number);
            Ok(Json(ApiResponse::navigated(
                format!("Step {} is now active", number),
                summary_or_500(&state)?,
            )))
        }
        Err(e) => {
            warn!("Failed to activate step {}: {}", number, e);
            Err(status_for(&e))
        }
    }
}

/// Handle POST /restart - Start the recipe over
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.restart() {
        Ok(()) => {
            info!("Restart endpoint called");
            Ok(Json(ApiResponse::navigated(
                "Recipe restarted".to_string(),
                summary_or_500(&state)?,
            )))
        }
        Err(e) => {
            error!("Failed to restart recipe: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle GET /steps - Every step as currently drawn
pub async fn steps_handler(State(state): State<Arc<AppState>>) -> Result<Json<StepsResponse>, StatusCode> {
    match state.title_and_views() {
        Ok((title, steps)) => Ok(Json(StepsResponse { title, steps })),
        Err(e) => {
            error!("Failed to render steps: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle GET /steps/active - The active step's card
pub async fn active_step_handler(State(state): State<Arc<AppState>>) -> Result<Json<StepView>, StatusCode> {
    match state.active_view() {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to render active step: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = summary_or_500(&state)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
