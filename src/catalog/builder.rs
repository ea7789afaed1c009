use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, SubsecRound};
use log::debug;

use crate::catalog::{local_datetime, CatalogError, DayPassSet, VisibilityEvent};

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Passes shorter than this are too brief to work and are dropped.
    pub min_pass_duration: Option<Duration>,
}

/// Normalizes the passes of one civil day.
///
/// Passes crossing midnight are clipped to `[00:00, 24:00)` of `date` in
/// `tz`; passes that do not touch the day at all are left out. Timestamps
/// are truncated to whole seconds.
pub fn build_day(
    date: NaiveDate,
    tz: FixedOffset,
    events: &[VisibilityEvent],
    options: &CatalogOptions,
) -> Result<DayPassSet, CatalogError> {
    validate_all(events)?;
    Ok(build_validated(date, tz, events, options))
}

/// Splits a flat pass list into `days` consecutive day sets starting at
/// `start_date`. A pass over midnight shows up on both days.
pub fn build_horizon(
    start_date: NaiveDate,
    days: u32,
    tz: FixedOffset,
    events: &[VisibilityEvent],
    options: &CatalogOptions,
) -> Result<Vec<DayPassSet>, CatalogError> {
    validate_all(events)?;
    Ok(start_date
        .iter_days()
        .take(days as usize)
        .map(|date| build_validated(date, tz, events, options))
        .collect())
}

fn validate_all(events: &[VisibilityEvent]) -> Result<(), CatalogError> {
    events.iter().try_for_each(VisibilityEvent::validate)
}

fn build_validated(
    date: NaiveDate,
    tz: FixedOffset,
    events: &[VisibilityEvent],
    options: &CatalogOptions,
) -> DayPassSet {
    let day_start = local_datetime(date, NaiveTime::MIN, tz);
    let day_end = day_start + Duration::days(1);

    let mut kept: Vec<VisibilityEvent> = events
        .iter()
        .filter(|event| match options.min_pass_duration {
            Some(min) if event.duration() < min => {
                debug!(
                    "dropping {} pass at {}: shorter than {}s",
                    event.satellite,
                    event.rise,
                    min.num_seconds()
                );
                false
            }
            _ => true,
        })
        .filter_map(|event| clip(event, day_start, day_end, tz))
        .collect();

    kept.sort_by(|a, b| {
        a.rise
            .cmp(&b.rise)
            .then_with(|| a.set.cmp(&b.set))
            .then_with(|| a.satellite.cmp(&b.satellite))
    });

    DayPassSet::new(date, tz, kept)
}

fn clip(
    event: &VisibilityEvent,
    day_start: DateTime<FixedOffset>,
    day_end: DateTime<FixedOffset>,
    tz: FixedOffset,
) -> Option<VisibilityEvent> {
    let rise = event.rise.max(day_start).with_timezone(&tz).trunc_subsecs(0);
    let set = event.set.min(day_end).with_timezone(&tz).trunc_subsecs(0);
    if rise >= set {
        return None;
    }
    if rise != event.rise || set != event.set {
        debug!(
            "clipped {} pass {}..{} to {}..{}",
            event.satellite, event.rise, event.set, rise, set
        );
    }
    Some(VisibilityEvent {
        satellite: event.satellite.clone(),
        norad_id: event.norad_id,
        rise,
        set,
    })
}
