mod constraints;
mod error;
mod interval;
mod planner;
mod ranking;
mod status;
mod window;

pub use constraints::{OperatingConstraints, MAX_HORIZON_DAYS};
pub use error::PlanError;
pub use interval::{merge, Interval};
pub use planner::Planner;
pub use ranking::{plan_days, select_best_day, DayForecast, Forecast};
pub use status::{annotate, PassState, PassStatus};
pub use window::{optimize_day, Score, WindowResult};
