use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::local_datetime;
use crate::parsing::serialize_duration;
use crate::planner::PlanError;

pub const MAX_HORIZON_DAYS: u32 = 30;

/// The daily operating envelope and forecast length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct OperatingConstraints {
    #[schema(value_type = String, example = "09:00:00")]
    pub earliest_start: NaiveTime,
    #[schema(value_type = String, example = "22:00:00")]
    pub latest_finish: NaiveTime,
    #[serde(serialize_with = "serialize_duration")]
    #[schema(value_type = String, example = "3h")]
    pub max_duration: Duration,
    pub horizon_days: u32,
}

impl Default for OperatingConstraints {
    fn default() -> Self {
        Self {
            earliest_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            latest_finish: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            max_duration: Duration::hours(3),
            horizon_days: 1,
        }
    }
}

impl OperatingConstraints {
    /// Time between the earliest start and the latest finish.
    pub fn span(&self) -> Duration {
        self.latest_finish - self.earliest_start
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        let span = self.span();
        if span <= Duration::zero()
            || self.max_duration <= Duration::zero()
            || self.max_duration > span
        {
            return Err(PlanError::InfeasibleConstraints {
                max_duration_s: self.max_duration.num_seconds(),
                span_s: span.num_seconds(),
            });
        }

        if !(1..=MAX_HORIZON_DAYS).contains(&self.horizon_days) {
            return Err(PlanError::EmptyHorizon(self.horizon_days));
        }

        Ok(())
    }

    /// Earliest start and latest finish instants on `date`.
    pub fn bounds_on(
        &self,
        date: NaiveDate,
        tz: FixedOffset,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (
            local_datetime(date, self.earliest_start, tz),
            local_datetime(date, self.latest_finish, tz),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let constraints = OperatingConstraints::default();
        assert!(constraints.validate().is_ok());
        assert_eq!(constraints.span(), Duration::hours(13));
    }

    #[test]
    fn duration_longer_than_span_is_infeasible() {
        let constraints = OperatingConstraints {
            earliest_start: hm(20, 0),
            latest_finish: hm(22, 0),
            max_duration: Duration::hours(3),
            horizon_days: 1,
        };
        assert!(matches!(
            constraints.validate(),
            Err(PlanError::InfeasibleConstraints {
                max_duration_s: 10800,
                span_s: 7200
            })
        ));
    }

    #[test]
    fn duration_equal_to_span_is_feasible() {
        let constraints = OperatingConstraints {
            earliest_start: hm(20, 0),
            latest_finish: hm(22, 0),
            max_duration: Duration::hours(2),
            horizon_days: 1,
        };
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn inverted_hours_are_infeasible() {
        let constraints = OperatingConstraints {
            earliest_start: hm(22, 0),
            latest_finish: hm(9, 0),
            max_duration: Duration::hours(1),
            horizon_days: 1,
        };
        assert!(matches!(
            constraints.validate(),
            Err(PlanError::InfeasibleConstraints { .. })
        ));
    }

    #[test]
    fn zero_duration_is_infeasible() {
        let constraints = OperatingConstraints {
            max_duration: Duration::zero(),
            ..Default::default()
        };
        assert!(matches!(
            constraints.validate(),
            Err(PlanError::InfeasibleConstraints { .. })
        ));
    }

    #[test]
    fn horizon_must_be_within_range() {
        for days in [0, 31, 100] {
            let constraints = OperatingConstraints {
                horizon_days: days,
                ..Default::default()
            };
            assert!(matches!(
                constraints.validate(),
                Err(PlanError::EmptyHorizon(d)) if d == days
            ));
        }
        for days in [1, 30] {
            let constraints = OperatingConstraints {
                horizon_days: days,
                ..Default::default()
            };
            assert!(constraints.validate().is_ok());
        }
    }

    #[test]
    fn bounds_follow_timezone() {
        let tz = FixedOffset::east_opt(-5 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let (start, end) = OperatingConstraints::default().bounds_on(date, tz);
        assert_eq!(start.to_rfc3339(), "2026-10-18T09:00:00-05:00");
        assert_eq!(end.to_rfc3339(), "2026-10-18T22:00:00-05:00");
    }
}
