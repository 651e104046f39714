//! Error types for registry construction and conversion
//!
//! Every failure is a distinct variant. Callers can always tell an unknown
//! unit apart from a bad value or a malformed table row.

use std::fmt;
use thiserror::Error;

/// Errors raised while converting a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Origin or target unit is not a key of the registry.
    /// Both requested identifiers are reported, even if only one is missing.
    #[error("Invalid units: {origin}, {target}")]
    UnknownUnit { origin: String, target: String },

    /// Value is neither a number, a numeric string, nor a collection of numbers
    #[error("Unsupported value type {found}: {reason}")]
    UnsupportedType { found: &'static str, reason: String },

    /// In-place conversion was requested for a shape that cannot be mutated
    #[error("In-place conversion is not supported for {found}")]
    InPlaceUnsupported { found: &'static str },
}

impl ConversionError {
    pub fn unknown_unit(origin: &str, target: &str) -> Self {
        ConversionError::UnknownUnit {
            origin: origin.to_string(),
            target: target.to_string(),
        }
    }

    pub fn unsupported(found: &'static str, reason: impl Into<String>) -> Self {
        ConversionError::UnsupportedType {
            found,
            reason: reason.into(),
        }
    }
}

/// What is wrong with a single registry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDefect {
    /// Scale of zero makes the transform non-invertible
    ZeroScale,
    /// Scale or offset is NaN or infinite
    NonFinite,
    /// List form with other than two components
    WrongArity(usize),
    /// A component (or the whole entry) is not a number
    NonNumeric,
    /// Unit identifier appears twice
    Duplicate,
}

impl fmt::Display for EntryDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryDefect::ZeroScale => write!(f, "scale must not be zero"),
            EntryDefect::NonFinite => write!(f, "scale and offset must be finite"),
            EntryDefect::WrongArity(n) => {
                write!(f, "expected exactly two numbers (scale, offset), got {}", n)
            }
            EntryDefect::NonNumeric => {
                write!(f, "expected a number, a pair of numbers, or {{scale, offset}}")
            }
            EntryDefect::Duplicate => write!(f, "unit is defined more than once"),
        }
    }
}

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A row of the unit table is malformed. No registry is produced.
    #[error("Invalid registry entry '{unit}': {defect}")]
    InvalidEntry { unit: String, defect: EntryDefect },

    /// The declarative table is not valid JSON
    #[error("Invalid unit table: {0}")]
    Parse(#[from] serde_json::Error),

    /// The table is valid JSON but not an object of unit rows
    #[error("Unit table must be a JSON object of unit name to entry, found {found}")]
    NotAnObject { found: &'static str },
}

impl RegistryError {
    pub fn invalid(unit: &str, defect: EntryDefect) -> Self {
        RegistryError::InvalidEntry {
            unit: unit.to_string(),
            defect,
        }
    }

    /// The defect, if this error came from a malformed row
    pub fn defect(&self) -> Option<EntryDefect> {
        match self {
            RegistryError::InvalidEntry { defect, .. } => Some(*defect),
            RegistryError::Parse(_) | RegistryError::NotAnObject { .. } => None,
        }
    }
}
