use chrono::{Days, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use utoipa::ToSchema;

use crate::catalog::CatalogOptions;
use crate::parsing::{parse_duration, parse_time_of_day, parse_utc_offset};
use crate::planner::{OperatingConstraints, Planner};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub station: StationConfig,
    pub operation: OperationConfig,
    pub catalog: CatalogConfig,
    pub planner: PlannerConfig,
    pub web: WebConfig,
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub name: Option<String>,
    /// Grid locator, shown alongside results only.
    pub locator: Option<String>,
    pub utc_offset: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: None,
            locator: None,
            utc_offset: "+00:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperationConfig {
    pub start_date: Option<NaiveDate>,
    pub earliest_start: String,
    pub latest_finish: String,
    pub max_duration: String,
    pub horizon_days: u32,
}

impl Default for OperationConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            earliest_start: "09:00".to_string(),
            latest_finish: "22:00".to_string(),
            max_duration: "3h".to_string(),
            horizon_days: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub min_pass_duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub parallel: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub name: String,
    pub permissions: HashSet<Permission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Plan,
    Validate,
}

/// Per-run values that take precedence over the `operation` and `station`
/// sections. Shared by the command line and the HTTP API.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, clap::Args)]
pub struct OperationOverrides {
    /// First civil day of the forecast (YYYY-MM-DD)
    #[arg(long = "date")]
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    /// Earliest start of operation (HH:MM)
    #[arg(long = "earliest")]
    #[serde(default)]
    pub earliest_start: Option<String>,
    /// Latest finish of operation (HH:MM)
    #[arg(long = "latest")]
    #[serde(default)]
    pub latest_finish: Option<String>,
    /// Maximum duration of operation, e.g. 3h
    #[arg(long = "duration")]
    #[serde(default)]
    pub max_duration: Option<String>,
    /// Number of days to forecast (1-30)
    #[arg(long = "days")]
    #[serde(default)]
    pub horizon_days: Option<u32>,
    /// Station UTC offset, e.g. +08:00
    #[arg(long)]
    #[serde(default)]
    pub utc_offset: Option<String>,
}

/// Everything a forecast run needs, resolved from configuration.
#[derive(Debug, Clone)]
pub struct PlanSetup {
    pub start_date: NaiveDate,
    pub timezone: FixedOffset,
    pub constraints: OperatingConstraints,
    pub catalog: CatalogOptions,
    pub parallel: bool,
}

impl PlanSetup {
    pub fn planner(&self) -> Planner {
        Planner::new(self.constraints)
            .with_catalog_options(self.catalog.clone())
            .parallel(self.parallel)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn find_api_key(&self, key: &str) -> Option<&ApiKey> {
        self.api_keys.iter().find(|k| k.key == key)
    }

    /// Parses the operating values with `overrides` applied. The resulting
    /// constraints are not validated yet.
    pub fn resolve(&self, overrides: &OperationOverrides) -> Result<PlanSetup, ConfigError> {
        let op = &self.operation;
        let invalid = |field: &'static str| move |message: String| ConfigError::Invalid { field, message };

        let timezone = parse_utc_offset(
            overrides
                .utc_offset
                .as_deref()
                .unwrap_or(&self.station.utc_offset),
        )
        .map_err(invalid("utc_offset"))?;

        let constraints = OperatingConstraints {
            earliest_start: parse_time_of_day(
                overrides.earliest_start.as_deref().unwrap_or(&op.earliest_start),
            )
            .map_err(invalid("earliest_start"))?,
            latest_finish: parse_time_of_day(
                overrides.latest_finish.as_deref().unwrap_or(&op.latest_finish),
            )
            .map_err(invalid("latest_finish"))?,
            max_duration: parse_duration(
                overrides.max_duration.as_deref().unwrap_or(&op.max_duration),
            )
            .map_err(invalid("max_duration"))?,
            horizon_days: overrides.horizon_days.unwrap_or(op.horizon_days),
        };

        let min_pass_duration = self
            .catalog
            .min_pass_duration
            .as_deref()
            .map(parse_duration)
            .transpose()
            .map_err(invalid("min_pass_duration"))?;

        let start_date = overrides
            .start_date
            .or(op.start_date)
            .unwrap_or_else(|| tomorrow(timezone));

        Ok(PlanSetup {
            start_date,
            timezone,
            constraints,
            catalog: CatalogOptions { min_pass_duration },
            parallel: self.planner.parallel,
        })
    }
}

fn tomorrow(tz: FixedOffset) -> NaiveDate {
    let today = Utc::now().with_timezone(&tz).date_naive();
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}
