use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::planner::PlanError;
use crate::web::auth::PermissionError;

pub enum ApiError {
    Permission(PermissionError),
    Config(ConfigError),
    Plan(PlanError),
}

impl From<PermissionError> for ApiError {
    fn from(e: PermissionError) -> Self {
        ApiError::Permission(e)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        ApiError::Config(e)
    }
}

impl From<PlanError> for ApiError {
    fn from(e: PlanError) -> Self {
        ApiError::Plan(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Permission(e) => return e.into_response(),
            ApiError::Config(e) => (StatusCode::BAD_REQUEST, "validation_failed", e.to_string()),
            ApiError::Plan(e) => {
                let code = match &e {
                    PlanError::InfeasibleConstraints { .. } => "infeasible_constraints",
                    PlanError::EmptyHorizon(_) => "empty_horizon",
                    PlanError::Catalog(CatalogError::InvalidEventOrder { .. }) => {
                        "invalid_event_order"
                    }
                    PlanError::Catalog(_) => "invalid_passes",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
        };
        (status, Json(ErrorResponse::with_message(code, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
