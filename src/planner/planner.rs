use chrono::{FixedOffset, NaiveDate};
use log::info;

use crate::catalog::{build_horizon, CatalogOptions, VisibilityEvent};
use crate::planner::{plan_days, Forecast, OperatingConstraints, PlanError};

/// Runs the whole forecast: catalog the raw passes, then optimize and rank.
#[derive(Debug, Clone)]
pub struct Planner {
    constraints: OperatingConstraints,
    catalog: CatalogOptions,
    parallel: bool,
}

impl Planner {
    pub fn new(constraints: OperatingConstraints) -> Self {
        Self {
            constraints,
            catalog: CatalogOptions::default(),
            parallel: false,
        }
    }

    pub fn with_catalog_options(mut self, catalog: CatalogOptions) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn constraints(&self) -> &OperatingConstraints {
        &self.constraints
    }

    pub fn forecast(
        &self,
        start_date: NaiveDate,
        tz: FixedOffset,
        events: &[VisibilityEvent],
    ) -> Result<Forecast, PlanError> {
        // configuration errors surface before any pass is looked at
        self.constraints.validate()?;

        let days = build_horizon(
            start_date,
            self.constraints.horizon_days,
            tz,
            events,
            &self.catalog,
        )?;
        info!(
            "Planning {} day(s) from {} with {} raw passes",
            days.len(),
            start_date,
            events.len()
        );

        plan_days(&days, &self.constraints, self.parallel)
    }
}
