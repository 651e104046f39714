//! Runtime settings from flags and environment
//!
//! Flags win over environment variables:
//! - `--units` / `GAUGE_UNITS_PATH`: catalog JSON merged over the built-ins
//! - `--log` / `GAUGE_LOG` / `RUST_LOG`: tracing filter, default `warn`

use std::env;
use std::path::PathBuf;
use gauge_units::{Catalog, CatalogError};

pub const UNITS_PATH_VAR: &str = "GAUGE_UNITS_PATH";
pub const LOG_VAR: &str = "GAUGE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub units_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    /// Resolve against the process environment
    pub fn resolve(units_flag: Option<PathBuf>, log_flag: Option<String>) -> Self {
        Self::from_sources(units_flag, log_flag, |key| env::var(key).ok())
    }

    pub fn from_sources<F>(units_flag: Option<PathBuf>, log_flag: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let units_path = units_flag.or_else(|| non_empty(UNITS_PATH_VAR).map(PathBuf::from));
        let log_filter = log_flag
            .or_else(|| non_empty(LOG_VAR))
            .or_else(|| non_empty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Settings { units_path, log_filter }
    }

    /// Built-in catalog, overlaid with the configured file if any
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        let builtin = Catalog::builtin();
        match &self.units_path {
            Some(path) => Ok(builtin.merge(Catalog::from_path(path)?)),
            None => Ok(builtin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(None, None, env_of(&[]));
        assert_eq!(settings.units_path, None);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_environment() {
        let settings = Settings::from_sources(
            None,
            None,
            env_of(&[(UNITS_PATH_VAR, "/etc/gauge.json"), ("RUST_LOG", "debug")]),
        );
        assert_eq!(settings.units_path, Some(PathBuf::from("/etc/gauge.json")));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn test_gauge_log_beats_rust_log() {
        let settings = Settings::from_sources(
            None,
            None,
            env_of(&[(LOG_VAR, "gauge_core=trace"), ("RUST_LOG", "info")]),
        );
        assert_eq!(settings.log_filter, "gauge_core=trace");
    }

    #[test]
    fn test_flags_win() {
        let settings = Settings::from_sources(
            Some(PathBuf::from("mine.json")),
            Some("info".to_string()),
            env_of(&[(UNITS_PATH_VAR, "/etc/gauge.json"), (LOG_VAR, "trace")]),
        );
        assert_eq!(settings.units_path, Some(PathBuf::from("mine.json")));
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_blank_environment_ignored() {
        let settings = Settings::from_sources(None, None, env_of(&[(UNITS_PATH_VAR, "  ")]));
        assert_eq!(settings.units_path, None);
    }

    #[test]
    fn test_catalog_with_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Data": {{"B": 1, "KB": 0.001}}}}"#).unwrap();

        let settings = Settings::from_sources(Some(file.path().to_path_buf()), None, env_of(&[]));
        let catalog = settings.catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get("Data").is_some());
    }

    #[test]
    fn test_catalog_missing_file() {
        let settings = Settings::from_sources(Some(PathBuf::from("/nonexistent/units.json")), None, env_of(&[]));
        assert!(settings.catalog().is_err());
    }
}
