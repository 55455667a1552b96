//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    presenter::StepView,
    state::{ActionResult, SessionSummary},
};

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ActionResult>,
    pub session: SessionSummary,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, result: Option<ActionResult>, session: SessionSummary) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            result,
            session,
        }
    }

    /// Response for a primary action
    pub fn action(result: ActionResult, session: SessionSummary) -> Self {
        let message = match &result {
            ActionResult::Timer { step_id, action } => {
                format!("Timer on step '{}' {}", step_id, action.as_str())
            }
            ActionResult::Advanced { active, .. } => format!("Moved on to step {}", active + 1),
            ActionResult::Finished { .. } => "All steps completed! Enjoy your meal!".to_string(),
        };
        Self::new("ok", message, Some(result), session)
    }

    /// Response for navigation requests
    pub fn navigated(message: String, session: SessionSummary) -> Self {
        Self::new("ok", message, None, session)
    }
}

/// Status response with session and timer information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub session: SessionSummary,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Every step as currently drawn
#[derive(Debug, Clone, Serialize)]
pub struct StepsResponse {
    pub title: String,
    pub steps: Vec<StepView>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
