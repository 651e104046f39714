//! Catalog: a named set of registries, one per dimension
//!
//! A catalog file is a JSON object mapping a dimension name to a unit table:
//!
//! ```json
//! {
//!   "Temperature": { "ºC": [1, 0], "°F": [1.8, 32] },
//!   "Data": { "B": 1, "KiB": 0.0009765625 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, info};
use gauge_core::{Registry, RegistryError};

use crate::dimension::Dimension;

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog must be a JSON object of dimension name to unit table")]
    NotAnObject,

    #[error("Dimension '{dimension}': {source}")]
    Registry { dimension: String, source: RegistryError },
}

/// Registries keyed by dimension name, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    registries: Vec<(String, Registry)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Temperature, Length, Weight and Volume
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();
        for dimension in Dimension::ALL {
            catalog.insert(dimension.name(), dimension.registry().clone());
        }
        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: JsonValue = serde_json::from_str(json)?;
        let tables = value.as_object().ok_or(CatalogError::NotAnObject)?;

        let mut catalog = Catalog::new();
        for (dimension, table) in tables {
            let registry = Registry::from_json(table).map_err(|source| CatalogError::Registry {
                dimension: dimension.clone(),
                source,
            })?;
            catalog.insert(dimension, registry);
        }
        debug!(dimensions = catalog.len(), "catalog parsed");
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), dimensions = catalog.len(), "loaded unit catalog");
        Ok(catalog)
    }

    /// Add a registry, replacing any registry with the same name
    pub fn insert(&mut self, name: impl Into<String>, registry: Registry) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.registries[i] = (name, registry),
            None => self.registries.push((name, registry)),
        }
    }

    /// Overlay `other` on top of this catalog. Tables with a matching name
    /// replace the existing ones; new names are appended.
    pub fn merge(mut self, other: Catalog) -> Self {
        for (name, registry) in other.registries {
            self.insert(name, registry);
        }
        self
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.registries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
    }

    /// Look up a registry by name (case-insensitive). Aliases of the
    /// built-in dimensions ("mass") resolve to their canonical name.
    pub fn get(&self, name: &str) -> Option<&Registry> {
        self.position(name)
            .or_else(|| {
                let dimension = name.parse::<Dimension>().ok()?;
                self.position(dimension.name())
            })
            .map(|i| &self.registries[i].1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.registries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registry)> + '_ {
        self.registries.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// First registry that knows both units
    pub fn find(&self, origin: &str, target: &str) -> Option<(&str, &Registry)> {
        self.iter()
            .find(|(_, r)| r.contains(origin) && r.contains(target))
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gauge_core::EntryDefect;
    use std::io::Write;

    #[test]
    fn test_builtin() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Temperature", "Length", "Weight", "Volume"]);
        assert!(catalog.get("weight").unwrap().contains("lb"));
    }

    #[test]
    fn test_get_resolves_dimension_alias() {
        let catalog = Catalog::builtin();
        let weight = catalog.get("mass").unwrap();
        assert!(weight.contains("kg"));
        assert!(Catalog::new().get("mass").is_none());

        // a table explicitly named "Mass" wins over the alias
        let custom = Catalog::from_json_str(r#"{"Mass": {"u": 1}}"#).unwrap();
        let catalog = Catalog::builtin().merge(custom);
        assert!(catalog.get("mass").unwrap().contains("u"));
    }

    #[test]
    fn test_find_by_units() {
        let catalog = Catalog::builtin();
        let (name, _) = catalog.find("ft", "mi").unwrap();
        assert_eq!(name, "Length");
        assert!(catalog.find("ft", "kg").is_none());
    }

    #[test]
    fn test_from_json_str() {
        let catalog = Catalog::from_json_str(
            r#"{"Data": {"B": 1, "KiB": 0.0009765625}, "Speed": {"m/s": [1, 0], "km/h": {"scale": 3.6}}}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        let data = catalog.get("Data").unwrap();
        assert_relative_eq!(data.convert(1.0, "KiB", "B", false).unwrap(), 1024.0);
        let speed = catalog.get("speed").unwrap();
        assert_relative_eq!(speed.convert(10.0, "m/s", "km/h", false).unwrap(), 36.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_table_names_dimension() {
        let err = Catalog::from_json_str(r#"{"Data": {"B": 0}}"#).unwrap_err();
        match err {
            CatalogError::Registry { dimension, source } => {
                assert_eq!(dimension, "Data");
                assert_eq!(source.defect(), Some(EntryDefect::ZeroScale));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(Catalog::from_json_str("[1, 2]"), Err(CatalogError::NotAnObject)));
        assert!(matches!(Catalog::from_json_str("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_merge_overrides_by_name() {
        let custom = Catalog::from_json_str(r#"{"temperature": {"K": 1}, "Data": {"B": 1}}"#).unwrap();
        let catalog = Catalog::builtin().merge(custom);

        assert_eq!(catalog.len(), 5);
        let temperature = catalog.get("Temperature").unwrap();
        assert_eq!(temperature.len(), 1);
        assert!(catalog.get("Data").is_some());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Length": {{"m": 1, "ft": 3.28084}}}}"#).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        let length = catalog.get("Length").unwrap();
        assert_relative_eq!(length.convert(1.0, "m", "ft", false).unwrap(), 3.28084);
    }

    #[test]
    fn test_from_missing_path() {
        let err = Catalog::from_path("/nonexistent/gauge/units.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gauge/units.json"));
    }
}
