//! Gauge Units - Built-in measurement tables
//!
//! Provides one registry per built-in dimension and a catalog that can be
//! extended from a JSON file.
//!
//! Dimensions:
//! - Temperature (°F, ºC, K, ºR, ºD, ºRe, ºN, ºRø)
//! - Length (m, km, cm, in, ft, yd, mi, nmi, au, ly, pc, etc.)
//! - Weight (kg, g, mg, lb, oz, st, ton, uston)
//! - Volume (L, mL, m³, gal, qt, pt, fl_oz, cup)

mod units;
mod dimension;
mod catalog;

pub use units::{LENGTH, TEMPERATURE, VOLUME, WEIGHT};
pub use dimension::{Dimension, UnknownDimension};
pub use catalog::{Catalog, CatalogError};
