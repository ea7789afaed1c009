use chrono::{DateTime, FixedOffset};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid event order for {satellite}: rise {rise} is not before set {set}")]
    InvalidEventOrder {
        satellite: String,
        rise: DateTime<FixedOffset>,
        set: DateTime<FixedOffset>,
    },
    #[error("pass file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported pass file format: {0}")]
    UnsupportedFormat(String),
}
