use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::DayPassSet;
use crate::planner::{annotate, optimize_day, OperatingConstraints, PassStatus, PlanError, WindowResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayForecast {
    #[serde(flatten)]
    pub window: WindowResult,
    pub passes: Vec<PassStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Forecast {
    pub days: Vec<DayForecast>,
    /// Index into `days` of the best day.
    pub best: usize,
}

impl Forecast {
    pub fn best_day(&self) -> &DayForecast {
        &self.days[self.best]
    }
}

/// Picks the day with the greatest (workable satellites, covered seconds),
/// the earliest date winning ties. Returns its position.
pub fn select_best_day<'a>(results: impl IntoIterator<Item = &'a WindowResult>) -> Option<usize> {
    results
        .into_iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.score()
                .cmp(&b.score())
                .then_with(|| b.date.cmp(&a.date))
        })
        .map(|(i, _)| i)
}

/// Optimizes every day independently and ranks them.
///
/// With `parallel` the days are spread over the rayon pool; the output is
/// identical either way.
pub fn plan_days(
    days: &[DayPassSet],
    constraints: &OperatingConstraints,
    parallel: bool,
) -> Result<Forecast, PlanError> {
    constraints.validate()?;

    let forecast_day = |day: &DayPassSet| {
        let window = optimize_day(day, constraints);
        debug!(
            "{}: {} of {} passes workable from {} to {}, {}s covered",
            window.date,
            window.workable_count(),
            window.pass_count,
            window.start.format("%H:%M:%S"),
            window.end.format("%H:%M:%S"),
            window.covered_seconds
        );
        let passes = annotate(day, &window);
        DayForecast { window, passes }
    };

    let forecasts: Vec<DayForecast> = if parallel {
        days.par_iter().map(forecast_day).collect()
    } else {
        days.iter().map(forecast_day).collect()
    };

    let best = select_best_day(forecasts.iter().map(|d| &d.window))
        .ok_or(PlanError::EmptyHorizon(0))?;

    let best_window = &forecasts[best].window;
    info!(
        "Best day {} with {} workable satellites starting at {}",
        best_window.date,
        best_window.workable_count(),
        best_window.start
    );

    Ok(Forecast {
        days: forecasts,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_horizon, CatalogOptions, VisibilityEvent};
    use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn pass(sat: &str, rise: &str, minutes: i64) -> VisibilityEvent {
        let rise = ts(rise);
        VisibilityEvent::new(sat, rise, rise + Duration::minutes(minutes))
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn three_days() -> Vec<DayPassSet> {
        let events = vec![
            // day 1: one very long pass
            pass("AO-7", "2026-10-18T10:00:00Z", 50),
            // day 2: three short passes close together
            pass("ISS", "2026-10-19T10:00:00Z", 5),
            pass("SO-50", "2026-10-19T10:20:00Z", 5),
            pass("AO-91", "2026-10-19T10:40:00Z", 5),
            // day 3: two passes
            pass("ISS", "2026-10-20T12:00:00Z", 10),
            pass("FO-29", "2026-10-20T12:30:00Z", 15),
        ];
        let tz = FixedOffset::east_opt(0).unwrap();
        build_horizon(start(), 3, tz, &events, &CatalogOptions::default()).unwrap()
    }

    fn constraints(days: u32) -> OperatingConstraints {
        OperatingConstraints {
            max_duration: Duration::hours(1),
            horizon_days: days,
            ..Default::default()
        }
    }

    #[test]
    fn best_day_has_most_workable_satellites() {
        let forecast = plan_days(&three_days(), &constraints(3), false).unwrap();
        assert_eq!(forecast.days.len(), 3);
        assert_eq!(forecast.best, 1);
        let best = forecast.best_day();
        assert_eq!(best.window.date, start().succ_opt().unwrap());
        assert_eq!(best.window.workable_count(), 3);
        // the long pass on day 1 covers more time with fewer satellites
        assert!(forecast.days[0].window.covered_seconds > best.window.covered_seconds);
        assert_eq!(best.passes.len(), 3);
    }

    #[test]
    fn parallel_matches_sequential() {
        let days = three_days();
        assert_eq!(
            plan_days(&days, &constraints(3), true).unwrap(),
            plan_days(&days, &constraints(3), false).unwrap()
        );
    }

    #[test]
    fn ties_go_to_the_earliest_date() {
        let events = vec![
            pass("ISS", "2026-10-18T10:00:00Z", 10),
            pass("ISS", "2026-10-19T15:00:00Z", 10),
        ];
        let tz = FixedOffset::east_opt(0).unwrap();
        let days = build_horizon(start(), 2, tz, &events, &CatalogOptions::default()).unwrap();
        let forecast = plan_days(&days, &constraints(2), false).unwrap();
        assert_eq!(forecast.best, 0);
    }

    #[test]
    fn single_day_is_its_own_best() {
        let days = three_days();
        let forecast = plan_days(&days[..1], &constraints(1), false).unwrap();
        assert_eq!(forecast.best, 0);
        assert_eq!(select_best_day(std::iter::empty()), None);
    }

    #[test]
    fn infeasible_constraints_fail_before_planning() {
        let bad = OperatingConstraints {
            max_duration: Duration::hours(14),
            ..Default::default()
        };
        assert!(matches!(
            plan_days(&three_days(), &bad, false),
            Err(PlanError::InfeasibleConstraints { .. })
        ));
    }
}
