//! Unit registry: one dimension's table of unit transforms
//!
//! A registry is built once through a validating constructor and is
//! read-only afterwards. Rows may be given as a bare scale, a
//! `(scale, offset)` pair, a two-element list, or (from JSON) an object
//! with `scale` and optional `offset`. All forms are normalized into
//! [`UnitTransform`] before the registry is handed out.

use std::collections::HashMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{EntryDefect, RegistryError};
use crate::transform::UnitTransform;

/// Declarative form of one registry row, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum UnitEntry {
    /// Bare scale; the offset defaults to 0
    Scale(f64),
    /// Ordered pair (scale, offset)
    Pair(f64, f64),
    /// List form; must hold exactly two numbers
    List(Vec<f64>),
}

impl UnitEntry {
    /// Coerce into the canonical transform
    pub fn normalize(self) -> Result<UnitTransform, EntryDefect> {
        match self {
            UnitEntry::Scale(scale) => UnitTransform::scaled(scale),
            UnitEntry::Pair(scale, offset) => UnitTransform::new(scale, offset),
            UnitEntry::List(parts) => match parts.as_slice() {
                [scale, offset] => UnitTransform::new(*scale, *offset),
                other => Err(EntryDefect::WrongArity(other.len())),
            },
        }
    }

    /// Read a row of a JSON unit table
    pub fn from_json(value: &JsonValue) -> Result<Self, EntryDefect> {
        match value {
            JsonValue::Number(n) => n.as_f64().map(UnitEntry::Scale).ok_or(EntryDefect::NonNumeric),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| item.as_f64().ok_or(EntryDefect::NonNumeric))
                .collect::<Result<Vec<_>, _>>()
                .map(UnitEntry::List),
            JsonValue::Object(fields) => {
                let scale = fields
                    .get("scale")
                    .and_then(JsonValue::as_f64)
                    .ok_or(EntryDefect::NonNumeric)?;
                let offset = match fields.get("offset") {
                    None => 0.0,
                    Some(v) => v.as_f64().ok_or(EntryDefect::NonNumeric)?,
                };
                Ok(UnitEntry::Pair(scale, offset))
            }
            _ => Err(EntryDefect::NonNumeric),
        }
    }
}

impl From<f64> for UnitEntry {
    fn from(scale: f64) -> Self {
        UnitEntry::Scale(scale)
    }
}

impl From<(f64, f64)> for UnitEntry {
    fn from((scale, offset): (f64, f64)) -> Self {
        UnitEntry::Pair(scale, offset)
    }
}

impl From<[f64; 2]> for UnitEntry {
    fn from([scale, offset]: [f64; 2]) -> Self {
        UnitEntry::Pair(scale, offset)
    }
}

impl From<Vec<f64>> for UnitEntry {
    fn from(parts: Vec<f64>) -> Self {
        UnitEntry::List(parts)
    }
}

impl From<UnitTransform> for UnitEntry {
    fn from(t: UnitTransform) -> Self {
        UnitEntry::Pair(t.scale(), t.offset())
    }
}

/// Registry of the units of one dimension.
///
/// Lookups are case- and symbol-sensitive ("ºC" and "°C" are different keys).
/// Units are enumerated in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Registry {
    units: Vec<(String, UnitTransform)>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from `(unit, entry)` rows.
    ///
    /// Fails on the first malformed or duplicate row; no partial registry
    /// is ever returned.
    pub fn from_entries<I, K, E>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<UnitEntry>,
    {
        let mut registry = Registry::default();
        for (unit, entry) in entries {
            let unit = unit.into();
            let transform = entry
                .into()
                .normalize()
                .map_err(|defect| RegistryError::invalid(&unit, defect))?;
            registry.insert(unit, transform)?;
        }
        debug!(units = registry.len(), "registry built");
        Ok(registry)
    }

    /// Build a registry from a JSON object of rows
    pub fn from_json(table: &JsonValue) -> Result<Self, RegistryError> {
        let rows = table.as_object().ok_or(RegistryError::NotAnObject {
            found: json_type_name(table),
        })?;
        let mut registry = Registry::default();
        for (unit, row) in rows {
            let transform = UnitEntry::from_json(row)
                .and_then(UnitEntry::normalize)
                .map_err(|defect| RegistryError::invalid(unit, defect))?;
            registry.insert(unit.clone(), transform)?;
        }
        debug!(units = registry.len(), "registry loaded from table");
        Ok(registry)
    }

    pub fn from_json_str(table: &str) -> Result<Self, RegistryError> {
        let value: JsonValue = serde_json::from_str(table)?;
        Self::from_json(&value)
    }

    /// Start a builder for chained registration
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn insert(&mut self, unit: String, transform: UnitTransform) -> Result<(), RegistryError> {
        if self.index.contains_key(&unit) {
            return Err(RegistryError::invalid(&unit, EntryDefect::Duplicate));
        }
        self.index.insert(unit.clone(), self.units.len());
        self.units.push((unit, transform));
        Ok(())
    }

    /// Get the transform for a unit
    pub fn get(&self, unit: &str) -> Option<&UnitTransform> {
        self.index.get(unit).map(|&i| &self.units[i].1)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.index.contains_key(unit)
    }

    /// Unit identifiers in declaration order
    pub fn units(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.iter().map(|(unit, _)| unit.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitTransform)> + '_ {
        self.units.iter().map(|(unit, t)| (unit.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// First unit with scale 1 and offset 0, if any
    pub fn base_unit(&self) -> Option<&str> {
        self.iter().find(|(_, t)| t.is_base()).map(|(unit, _)| unit)
    }

    /// Whether a unit has a shifted zero point. `None` for unknown units.
    pub fn has_offset(&self, unit: &str) -> Option<bool> {
        self.get(unit).map(UnitTransform::has_offset)
    }

    /// Whether absolute and delta conversion differ for this pair, i.e.
    /// whether a presentation layer should offer the interval toggle
    pub fn needs_delta_choice(&self, origin: &str, target: &str) -> bool {
        self.has_offset(origin).unwrap_or(false) || self.has_offset(target).unwrap_or(false)
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.units.len()))?;
        for (unit, transform) in &self.units {
            map.serialize_entry(unit, transform)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = JsonValue::deserialize(deserializer)?;
        Registry::from_json(&table).map_err(de::Error::custom)
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Chained registration, validated all at once by [`RegistryBuilder::build`]
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    rows: Vec<(String, UnitEntry)>,
}

impl RegistryBuilder {
    pub fn unit(mut self, unit: impl Into<String>, entry: impl Into<UnitEntry>) -> Self {
        self.rows.push((unit.into(), entry.into()));
        self
    }

    pub fn build(self) -> Result<Registry, RegistryError> {
        Registry::from_entries(self.rows)
    }
}
