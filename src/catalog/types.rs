use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::CatalogError;

/// One pass of a satellite above the station horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisibilityEvent {
    pub satellite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norad_id: Option<u32>,
    #[schema(value_type = String, format = DateTime)]
    pub rise: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub set: DateTime<FixedOffset>,
}

impl VisibilityEvent {
    pub fn new(
        satellite: impl Into<String>,
        rise: DateTime<FixedOffset>,
        set: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            satellite: satellite.into(),
            norad_id: None,
            rise,
            set,
        }
    }

    pub fn duration(&self) -> Duration {
        self.set - self.rise
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.rise >= self.set {
            return Err(CatalogError::InvalidEventOrder {
                satellite: self.satellite.clone(),
                rise: self.rise,
                set: self.set,
            });
        }
        Ok(())
    }
}

/// The passes of one civil day, sorted by rise time and clipped to the day.
///
/// Only the catalog builder creates these, so the ordering and clipping
/// invariants hold for every instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPassSet {
    date: NaiveDate,
    timezone: FixedOffset,
    events: Vec<VisibilityEvent>,
}

impl DayPassSet {
    pub(crate) fn new(date: NaiveDate, timezone: FixedOffset, events: Vec<VisibilityEvent>) -> Self {
        Self {
            date,
            timezone,
            events,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn events(&self) -> &[VisibilityEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The instant `time` on this day in the day's timezone.
    pub fn at(&self, time: NaiveTime) -> DateTime<FixedOffset> {
        local_datetime(self.date, time, self.timezone)
    }
}

/// Resolves a wall clock time on `date` in a fixed-offset zone.
pub fn local_datetime(date: NaiveDate, time: NaiveTime, tz: FixedOffset) -> DateTime<FixedOffset> {
    let utc = date.and_time(time) - Duration::seconds(i64::from(tz.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, tz)
}
