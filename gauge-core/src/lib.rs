//! Gauge Core - Unit conversion engine
//!
//! This crate provides the engine shared by the rest of Gauge:
//! - `UnitTransform`: affine (scale, offset) relation of a unit to its base unit
//! - `Registry`: the units of one dimension, validated at construction
//! - `Value`: the shapes a conversion accepts (number, text, list, map, tuple)
//! - `ConversionError` / `RegistryError`: distinguishable failures
//!
//! ```
//! use gauge_core::Registry;
//!
//! let temperature = Registry::builder()
//!     .unit("°C", (1.0, 0.0))
//!     .unit("°F", (1.8, 32.0))
//!     .build()
//!     .unwrap();
//!
//! assert!((temperature.convert(25.0, "°C", "°F", false).unwrap() - 77.0).abs() < 1e-9);
//! assert!((temperature.convert(10.0, "°C", "°F", true).unwrap() - 18.0).abs() < 1e-9);
//! ```

mod error;
mod transform;
mod registry;
mod value;
mod convert;

pub use error::{ConversionError, EntryDefect, RegistryError};
pub use transform::UnitTransform;
pub use registry::{Registry, RegistryBuilder, UnitEntry};
pub use value::Value;
pub use convert::{ConversionRequest, ConvertOptions, RequestValue};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConversionError, ConvertOptions, Registry, UnitTransform, Value};
}
