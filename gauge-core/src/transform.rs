//! Affine transform between a unit and its dimension's base unit

use serde::{Deserialize, Serialize};
use crate::error::EntryDefect;

/// How one unit relates to the base unit of its dimension.
///
/// `value_unit = value_base * scale + offset`, and conversely
/// `value_base = (value_unit - offset) / scale`.
/// The scale is never zero and both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct UnitTransform {
    scale: f64,
    offset: f64,
}

impl UnitTransform {
    /// The base unit itself: scale 1, offset 0
    pub const IDENTITY: UnitTransform = UnitTransform { scale: 1.0, offset: 0.0 };

    /// Create a transform, rejecting zero or non-finite components
    pub fn new(scale: f64, offset: f64) -> Result<Self, EntryDefect> {
        if !scale.is_finite() || !offset.is_finite() {
            return Err(EntryDefect::NonFinite);
        }
        if scale == 0.0 {
            return Err(EntryDefect::ZeroScale);
        }
        Ok(UnitTransform { scale, offset })
    }

    /// Purely multiplicative transform (offset 0)
    pub fn scaled(scale: f64) -> Result<Self, EntryDefect> {
        Self::new(scale, 0.0)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Units with a shifted zero point (temperature scales)
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }

    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Express a value of this unit in base units.
    /// A delta ignores the offset: shifts cancel out in a difference.
    pub fn to_base(&self, value: f64, delta: bool) -> f64 {
        if delta {
            value / self.scale
        } else {
            (value - self.offset) / self.scale
        }
    }

    /// Express a base-unit value in this unit
    pub fn from_base(&self, value: f64, delta: bool) -> f64 {
        if delta {
            value * self.scale
        } else {
            value * self.scale + self.offset
        }
    }
}

impl TryFrom<[f64; 2]> for UnitTransform {
    type Error = EntryDefect;

    fn try_from([scale, offset]: [f64; 2]) -> Result<Self, Self::Error> {
        UnitTransform::new(scale, offset)
    }
}

impl From<UnitTransform> for [f64; 2] {
    fn from(t: UnitTransform) -> Self {
        [t.scale, t.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fahrenheit() -> UnitTransform {
        UnitTransform::new(1.8, 32.0).unwrap()
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert_eq!(UnitTransform::new(0.0, 5.0), Err(EntryDefect::ZeroScale));
        assert_eq!(UnitTransform::scaled(-0.0), Err(EntryDefect::ZeroScale));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(UnitTransform::new(f64::NAN, 0.0), Err(EntryDefect::NonFinite));
        assert_eq!(UnitTransform::new(1.0, f64::INFINITY), Err(EntryDefect::NonFinite));
    }

    #[test]
    fn test_negative_scale_allowed() {
        // Delisle runs backwards
        let delisle = UnitTransform::new(-1.5, 150.0).unwrap();
        assert_relative_eq!(delisle.to_base(150.0, false), 0.0);
        assert_relative_eq!(delisle.from_base(100.0, false), 0.0);
    }

    #[test]
    fn test_absolute_uses_offset() {
        let f = fahrenheit();
        assert_relative_eq!(f.to_base(212.0, false), 100.0, epsilon = 1e-12);
        assert_relative_eq!(f.from_base(0.0, false), 32.0);
    }

    #[test]
    fn test_delta_ignores_offset() {
        let f = fahrenheit();
        assert_relative_eq!(f.to_base(18.0, true), 10.0, epsilon = 1e-12);
        assert_relative_eq!(f.from_base(10.0, true), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flags() {
        assert!(UnitTransform::IDENTITY.is_base());
        assert!(!UnitTransform::IDENTITY.has_offset());
        assert!(fahrenheit().has_offset());
        assert!(!UnitTransform::scaled(1000.0).unwrap().is_base());
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&fahrenheit()).unwrap();
        assert_eq!(json, "[1.8,32.0]");

        let back: UnitTransform = serde_json::from_str("[1.8, 32]").unwrap();
        assert_eq!(back, fahrenheit());

        assert!(serde_json::from_str::<UnitTransform>("[0, 1]").is_err());
    }
}
