use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{CatalogError, VisibilityEvent};

/// Pass list as written by the propagator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PassFile {
    #[serde(default)]
    pub passes: Vec<VisibilityEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassFormat {
    Yaml,
    Json,
}

impl PassFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(PassFormat::Yaml),
            Some("json") => Ok(PassFormat::Json),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load and validate the passes in a YAML or JSON pass file
pub fn load_passes(path: &Path) -> Result<Vec<VisibilityEvent>, CatalogError> {
    let format = PassFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let passes = parse_passes(&content, format)?;
    log::info!("Loaded {} passes from {}", passes.len(), path.display());
    Ok(passes)
}

pub fn parse_passes(content: &str, format: PassFormat) -> Result<Vec<VisibilityEvent>, CatalogError> {
    let file: PassFile = match format {
        PassFormat::Yaml => serde_yaml::from_str(content)?,
        PassFormat::Json => serde_json::from_str(content)?,
    };

    for pass in &file.passes {
        pass.validate()?;
    }

    Ok(file.passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_yaml_pass_file() {
        let yaml = r#"
passes:
  - satellite: ISS (ZARYA)
    norad_id: 25544
    rise: 2026-10-18T09:10:00+08:00
    set: 2026-10-18T09:25:00+08:00
  - satellite: AO-7
    rise: 2026-10-18T10:00:00+08:00
    set: 2026-10-18T10:14:00+08:00
"#;
        let passes = parse_passes(yaml, PassFormat::Yaml).unwrap();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].norad_id, Some(25544));
        assert_eq!(passes[0].duration().num_seconds(), 900);
        assert_eq!(passes[1].norad_id, None);
    }

    #[test]
    fn parses_json_pass_file() {
        let json = r#"{"passes": [
            {"satellite": "SO-50", "rise": "2026-10-18T01:00:00Z", "set": "2026-10-18T01:12:00Z"}
        ]}"#;
        let passes = parse_passes(json, PassFormat::Json).unwrap();
        assert_eq!(passes[0].satellite, "SO-50");
    }

    #[test]
    fn rejects_inverted_pass() {
        let json = r#"{"passes": [
            {"satellite": "SO-50", "rise": "2026-10-18T01:12:00Z", "set": "2026-10-18T01:00:00Z"}
        ]}"#;
        assert!(matches!(
            parse_passes(json, PassFormat::Json),
            Err(CatalogError::InvalidEventOrder { .. })
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            PassFormat::from_path(&PathBuf::from("passes.yml")).unwrap(),
            PassFormat::Yaml
        );
        assert_eq!(
            PassFormat::from_path(&PathBuf::from("passes.json")).unwrap(),
            PassFormat::Json
        );
        assert!(PassFormat::from_path(&PathBuf::from("passes.tle")).is_err());
    }
}
