use chrono::{DateTime, Duration, FixedOffset};

/// Half-open span of time `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length of the common part of both intervals, zero when disjoint.
    pub fn overlap(&self, other: &Interval) -> Duration {
        self.intersection(other)
            .map(|i| i.length())
            .unwrap_or_else(Duration::zero)
    }

    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let common = Interval::new(self.start.max(other.start), self.end.min(other.end));
        (!common.is_empty()).then_some(common)
    }
}

/// Coalesces overlapping or touching intervals into a sorted disjoint list.
pub fn merge(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().filter(|i| !i.is_empty()).collect();
    sorted.sort_by_key(|i| i.start);

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

pub(crate) fn clamp_instant(
    t: DateTime<FixedOffset>,
    lo: DateTime<FixedOffset>,
    hi: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    t.max(lo).min(hi)
}
