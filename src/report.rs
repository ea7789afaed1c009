//! Plain text rendering of a forecast for the command line.

use chrono::Duration;

use crate::parsing::format_duration;
use crate::planner::{DayForecast, Forecast, PassState, PassStatus};

pub fn day_summary(day: &DayForecast, max_duration: Duration, is_best: bool) -> String {
    let w = &day.window;
    format!(
        "On {}: {} passes, {} satellites can be worked within {}, starting at {} until {}, total time {} min{}",
        w.date,
        w.pass_count,
        w.workable_count(),
        format_duration(max_duration),
        w.start.format("%H:%M:%S"),
        w.end.format("%H:%M:%S"),
        w.covered_seconds / 60,
        if is_best { "  <- best" } else { "" }
    )
}

pub fn pass_line(pass: &PassStatus) -> String {
    let marker = match pass.state {
        PassState::Workable => '*',
        PassState::Idle => ' ',
    };
    format!(
        "  {} {} {:<24} {:>3} min  {}",
        marker,
        pass.rise.format("%H:%M:%S"),
        pass.satellite,
        pass.duration_seconds / 60,
        pass.state
    )
}

/// One summary line per day, plus the pass list when a single day was
/// forecast.
pub fn render(forecast: &Forecast, max_duration: Duration) -> Vec<String> {
    let mut lines: Vec<String> = forecast
        .days
        .iter()
        .enumerate()
        .map(|(i, day)| day_summary(day, max_duration, forecast.days.len() > 1 && i == forecast.best))
        .collect();

    if let [day] = forecast.days.as_slice() {
        lines.extend(day.passes.iter().map(pass_line));
    }

    lines
}
