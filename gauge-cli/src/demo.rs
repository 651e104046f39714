//! Sample conversions across every built-in dimension

use serde::Serialize;
use gauge_core::Registry;
use gauge_units::{Catalog, Dimension};

use crate::commands::Report;
use crate::error::CliError;
use crate::format::{format_number, result_line};

const SAMPLES: &[(Dimension, f64, &str, &str)] = &[
    (Dimension::Temperature, 75.0, "ºD", "ºC"),
    (Dimension::Temperature, 32.0, "°F", "ºC"),
    (Dimension::Temperature, 300.0, "K", "°F"),
    (Dimension::Temperature, 25.0, "ºC", "ºR"),
    (Dimension::Temperature, 10.0, "ºRe", "K"),
    (Dimension::Temperature, 10.0, "ºD", "ºN"),
    (Dimension::Temperature, 10.0, "ºRø", "ºC"),
    (Dimension::Length, 1.0, "m", "ft"),
    (Dimension::Length, 1.0, "mi", "km"),
    (Dimension::Length, 10.0, "in", "cm"),
    (Dimension::Length, 100.0, "yd", "m"),
    (Dimension::Weight, 1.0, "kg", "lb"),
    (Dimension::Weight, 1.0, "lb", "g"),
    (Dimension::Weight, 10.0, "oz", "g"),
    (Dimension::Weight, 1.0, "ton", "uston"),
    (Dimension::Volume, 1.0, "L", "gal"),
    (Dimension::Volume, 1.0, "gal", "L"),
    (Dimension::Volume, 1.0, "m³", "L"),
    (Dimension::Volume, 1.0, "cup", "mL"),
];

#[derive(Debug, Serialize)]
struct Sample {
    dimension: Dimension,
    value: f64,
    from: &'static str,
    to: &'static str,
    result: f64,
    formatted: String,
}

/// Registry to run a sample against: the catalog's table when it knows
/// both units, the built-in table otherwise
fn sample_registry<'c>(catalog: &'c Catalog, dimension: Dimension, from: &str, to: &str) -> &'c Registry {
    catalog
        .get(dimension.name())
        .filter(|registry| registry.contains(from) && registry.contains(to))
        .unwrap_or_else(|| dimension.registry())
}

/// Run the samples against `catalog`, so overridden tables show up too
pub fn run(catalog: &Catalog) -> Result<Report, CliError> {
    let mut lines = Vec::new();
    let mut samples = Vec::with_capacity(SAMPLES.len());
    let mut current = None;

    for &(dimension, value, from, to) in SAMPLES {
        let registry = sample_registry(catalog, dimension, from, to);
        let result = registry.convert(value, from, to, false)?;

        if current != Some(dimension) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("{}:", dimension));
            current = Some(dimension);
        }
        lines.push(format!("  {}", result_line(&value.to_string(), from, result, to)));

        samples.push(Sample {
            dimension,
            value,
            from,
            to,
            result,
            formatted: format_number(result),
        });
    }

    Ok(Report {
        text: lines.join("\n"),
        json: serde_json::json!({ "samples": samples }),
    })
}
