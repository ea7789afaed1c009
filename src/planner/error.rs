use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("maximum duration of {max_duration_s}s does not fit the operating span of {span_s}s")]
    InfeasibleConstraints { max_duration_s: i64, span_s: i64 },
    #[error("forecast horizon of {0} days is outside 1..=30")]
    EmptyHorizon(u32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
