use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::api::error::ErrorResponse;
use super::api::plan::{PlanRequest, ValidateResponse};
use crate::catalog::VisibilityEvent;
use crate::config::OperationOverrides;
use crate::planner::{DayForecast, Forecast, OperatingConstraints, PassState, PassStatus, WindowResult};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::plan::plan,
        super::api::plan::validate,
    ),
    components(
        schemas(
            PlanRequest,
            ValidateResponse,
            OperationOverrides,
            VisibilityEvent,
            OperatingConstraints,
            Forecast,
            DayForecast,
            WindowResult,
            PassStatus,
            PassState,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SOOP Planning API",
        description = "Find the best window for satellite operation from a list of passes",
        version = "0.1.0"
    ),
    tags(
        (name = "plan", description = "Operating window planning")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_plan_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/plan"));
        assert!(doc.paths.paths.contains_key("/api/plan/validate"));
    }
}
