use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::VisibilityEvent;
use crate::config::{Config, OperationOverrides, Permission};
use crate::planner::{Forecast, OperatingConstraints};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{require_permission, AppState, AuthenticatedUser};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlanRequest {
    #[serde(flatten)]
    pub overrides: OperationOverrides,
    #[serde(default)]
    pub passes: Vec<VisibilityEvent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    pub utc_offset: String,
    pub constraints: OperatingConstraints,
}

#[utoipa::path(
    post,
    path = "/api/plan",
    tag = "plan",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Best operating window per day", body = Forecast),
        (status = 400, description = "Invalid constraints or passes", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions")
    ),
    security(("api_key" = []))
)]
pub async fn plan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PlanRequest>,
) -> ApiResult<Json<Forecast>> {
    require_permission(&user, Permission::Plan)?;
    Ok(Json(run_plan(&state.config, &request)?))
}

#[utoipa::path(
    post,
    path = "/api/plan/validate",
    tag = "plan",
    request_body = OperationOverrides,
    responses(
        (status = 200, description = "Resolved constraints", body = ValidateResponse),
        (status = 400, description = "Invalid constraints", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions")
    ),
    security(("api_key" = []))
)]
pub async fn validate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(overrides): Json<OperationOverrides>,
) -> ApiResult<Json<ValidateResponse>> {
    require_permission(&user, Permission::Validate)?;
    Ok(Json(run_validate(&state.config, &overrides)?))
}

pub fn run_plan(config: &Config, request: &PlanRequest) -> ApiResult<Forecast> {
    let setup = config.resolve(&request.overrides)?;
    let forecast = setup
        .planner()
        .forecast(setup.start_date, setup.timezone, &request.passes)?;
    Ok(forecast)
}

pub fn run_validate(config: &Config, overrides: &OperationOverrides) -> ApiResult<ValidateResponse> {
    let setup = config.resolve(overrides)?;
    setup.constraints.validate()?;
    Ok(ValidateResponse {
        start_date: setup.start_date,
        utc_offset: setup.timezone.to_string(),
        constraints: setup.constraints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    fn request(json: &str) -> PlanRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn plans_from_request_body() {
        let body = request(
            r#"{
                "start_date": "2026-10-18",
                "earliest_start": "09:00",
                "latest_finish": "22:00",
                "max_duration": "1h",
                "utc_offset": "+08:00",
                "passes": [
                    {"satellite": "AO-91", "rise": "2026-10-18T09:00:00+08:00", "set": "2026-10-18T09:10:00+08:00"},
                    {"satellite": "SO-50", "rise": "2026-10-18T09:05:00+08:00", "set": "2026-10-18T09:20:00+08:00"}
                ]
            }"#,
        );
        let forecast = run_plan(&Config::default(), &body).ok().unwrap();
        let best = &forecast.best_day().window;
        assert_eq!(best.workable, ["AO-91", "SO-50"]);
        assert_eq!(best.covered_seconds, 1500);

        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(json["best"], 0);
        assert_eq!(json["days"][0]["covered_seconds"], 1500);
        assert_eq!(json["days"][0]["passes"][1]["state"], "workable");
    }

    #[test]
    fn infeasible_request_is_bad_request() {
        let body = request(r#"{"earliest_start": "20:00", "latest_finish": "21:00", "max_duration": "2h"}"#);
        let response = run_plan(&Config::default(), &body).err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unparsable_override_is_bad_request() {
        let overrides = OperationOverrides {
            earliest_start: Some("noon".into()),
            ..Default::default()
        };
        let response = run_validate(&Config::default(), &overrides).err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validate_resolves_defaults() {
        let overrides = OperationOverrides {
            start_date: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..Default::default()
        };
        let response = run_validate(&Config::default(), &overrides).ok().unwrap();
        assert_eq!(response.utc_offset, "+00:00");
        assert_eq!(response.constraints, OperatingConstraints::default());
    }
}
