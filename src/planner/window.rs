use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{DayPassSet, VisibilityEvent};
use crate::planner::interval::{clamp_instant, merge, Interval};
use crate::planner::OperatingConstraints;

/// Best operating window found for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WindowResult {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = String, format = DateTime)]
    pub start: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub end: DateTime<FixedOffset>,
    /// Satellites with at least one pass overlapping the window, sorted.
    pub workable: Vec<String>,
    /// Sum of the per-pass overlap with the window.
    pub covered_seconds: i64,
    /// Time within the window during which at least one workable pass is up.
    pub active_seconds: i64,
    /// All passes of the day, inside the window or not.
    pub pass_count: usize,
}

impl WindowResult {
    pub fn workable_count(&self) -> usize {
        self.workable.len()
    }

    pub fn score(&self) -> Score {
        Score {
            workable: self.workable_count(),
            covered_seconds: self.covered_seconds,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Objective value of a window. Field order gives the priority, so the
/// derived ordering is the lexicographic comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub workable: usize,
    pub covered_seconds: i64,
}

/// Finds the window start that maximizes (workable satellites, covered
/// seconds), preferring the earliest start among equal scores.
///
/// The window always has the maximum allowed length. As a function of the
/// start time, the overlap of a single pass is a clamped ramp whose corners
/// sit at `rise - d`, `rise`, `set - d` and `set`, and whether the pass is
/// workable only flips at `rise - d` and `set`. Timestamps are whole seconds,
/// so the best start on the second grid is at a corner or one second either
/// side of it; only those points (clamped to the feasible range) are scored.
///
/// `constraints` must have passed [`OperatingConstraints::validate`].
pub fn optimize_day(day: &DayPassSet, constraints: &OperatingConstraints) -> WindowResult {
    let (earliest, latest) = constraints.bounds_on(day.date(), day.timezone());
    let length = constraints.max_duration;
    let last_start = (latest - length).max(earliest);

    let mut best: Option<(Score, DateTime<FixedOffset>)> = None;
    for start in candidate_starts(day.events(), earliest, last_start, length) {
        let score = coverage(day.events(), Interval::new(start, start + length)).score();
        // candidates ascend, so a strict improvement keeps the earliest tie
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, start));
        }
    }

    let start = best.map(|(_, start)| start).unwrap_or(earliest);
    let end = start + length;
    let window = Interval::new(start, end);
    let chosen = coverage(day.events(), window);

    WindowResult {
        date: day.date(),
        start,
        end,
        workable: chosen.workable.iter().map(|s| s.to_string()).collect(),
        covered_seconds: chosen.covered.num_seconds(),
        active_seconds: active_time(day.events(), &window).num_seconds(),
        pass_count: day.len(),
    }
}

fn candidate_starts(
    events: &[VisibilityEvent],
    earliest: DateTime<FixedOffset>,
    last_start: DateTime<FixedOffset>,
    length: Duration,
) -> Vec<DateTime<FixedOffset>> {
    let second = Duration::seconds(1);
    let mut candidates = vec![earliest, last_start];

    for event in events {
        for corner in [event.rise - length, event.rise, event.set - length, event.set] {
            for t in [corner - second, corner, corner + second] {
                candidates.push(clamp_instant(t, earliest, last_start));
            }
        }
    }

    candidates.sort();
    candidates.dedup();
    candidates
}

struct Coverage<'a> {
    workable: BTreeSet<&'a str>,
    covered: Duration,
}

impl Coverage<'_> {
    fn score(&self) -> Score {
        Score {
            workable: self.workable.len(),
            covered_seconds: self.covered.num_seconds(),
        }
    }
}

fn coverage<'a>(events: &'a [VisibilityEvent], window: Interval) -> Coverage<'a> {
    let mut workable = BTreeSet::new();
    let mut covered = Duration::zero();

    // events are sorted by rise, nothing after this point can reach the window
    for event in events.iter().take_while(|e| e.rise < window.end) {
        let overlap = window.overlap(&Interval::new(event.rise, event.set));
        if overlap > Duration::zero() {
            workable.insert(event.satellite.as_str());
            covered = covered + overlap;
        }
    }

    Coverage { workable, covered }
}

fn active_time(events: &[VisibilityEvent], window: &Interval) -> Duration {
    merge(
        events
            .iter()
            .filter_map(|e| window.intersection(&Interval::new(e.rise, e.set))),
    )
    .iter()
    .map(Interval::length)
    .fold(Duration::zero(), |acc, d| acc + d)
}
