//! Named measurement dimensions with a built-in registry each

use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use gauge_core::Registry;

use crate::units::{LENGTH, TEMPERATURE, VOLUME, WEIGHT};

/// One of the built-in dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Temperature,
    Length,
    Weight,
    Volume,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Temperature,
        Dimension::Length,
        Dimension::Weight,
        Dimension::Volume,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Temperature => "Temperature",
            Dimension::Length => "Length",
            Dimension::Weight => "Weight",
            Dimension::Volume => "Volume",
        }
    }

    /// The built-in registry for this dimension
    pub fn registry(&self) -> &'static Registry {
        match self {
            Dimension::Temperature => &*TEMPERATURE,
            Dimension::Length => &*LENGTH,
            Dimension::Weight => &*WEIGHT,
            Dimension::Volume => &*VOLUME,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unknown dimension name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension: {0}")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("mass").then_some(Dimension::Weight))
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}
