mod builder;
mod error;
mod loader;
mod types;

pub use builder::{build_day, build_horizon, CatalogOptions};
pub use error::CatalogError;
pub use loader::{load_passes, parse_passes, PassFile, PassFormat};
pub use types::{local_datetime, DayPassSet, VisibilityEvent};
