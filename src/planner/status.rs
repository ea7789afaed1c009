use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::DayPassSet;
use crate::planner::{Interval, WindowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PassState {
    Workable,
    Idle,
}

/// A pass of the day and how much of it falls inside the chosen window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PassStatus {
    pub satellite: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub norad_id: Option<u32>,
    #[schema(value_type = String, format = DateTime)]
    pub rise: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub set: DateTime<FixedOffset>,
    pub duration_seconds: i64,
    pub covered_seconds: i64,
    pub state: PassState,
}

pub fn annotate(day: &DayPassSet, result: &WindowResult) -> Vec<PassStatus> {
    let window = result.interval();
    day.events()
        .iter()
        .map(|event| {
            let covered = window.overlap(&Interval::new(event.rise, event.set));
            PassStatus {
                satellite: event.satellite.clone(),
                norad_id: event.norad_id,
                rise: event.rise,
                set: event.set,
                duration_seconds: event.duration().num_seconds(),
                covered_seconds: covered.num_seconds(),
                state: if covered.num_seconds() > 0 {
                    PassState::Workable
                } else {
                    PassState::Idle
                },
            }
        })
        .collect()
}
