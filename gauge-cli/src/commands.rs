//! Subcommand implementations
//!
//! Each command returns a [`Report`]: a line-oriented text rendering and a
//! JSON document, so `main` only has to pick one.

use serde_json::{json, Value as JsonValue};
use tracing::debug;
use gauge_core::{ConversionError, Registry};
use gauge_units::{Catalog, UnknownDimension};

use crate::error::CliError;
use crate::format::{format_number, parse_input, result_line};

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub json: JsonValue,
}

/// Arguments of `gauge convert`
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub value: String,
    pub from: String,
    pub to: String,
    pub dimension: Option<String>,
    pub delta: bool,
    pub swap: bool,
}

fn registry<'c>(catalog: &'c Catalog, name: &str) -> Result<&'c Registry, CliError> {
    catalog
        .get(name)
        .ok_or_else(|| UnknownDimension(name.to_string()).into())
}

pub fn convert(catalog: &Catalog, args: &ConvertArgs) -> Result<Report, CliError> {
    let value = parse_input(&args.value)?;
    let (from, to) = if args.swap {
        (args.to.as_str(), args.from.as_str())
    } else {
        (args.from.as_str(), args.to.as_str())
    };

    let (dimension, registry) = match &args.dimension {
        Some(name) => (name.as_str(), registry(catalog, name)?),
        None => catalog
            .find(from, to)
            .ok_or_else(|| ConversionError::unknown_unit(from, to))?,
    };
    debug!(dimension, from, to, delta = args.delta, "converting");

    let result = registry.convert(value, from, to, args.delta)?;
    let text = result_line(&args.value, from, result, to);

    Ok(Report {
        json: json!({
            "dimension": dimension,
            "value": value,
            "from": from,
            "to": to,
            "delta": args.delta,
            "result": result,
            "formatted": format_number(result),
            "delta_relevant": registry.needs_delta_choice(from, to),
        }),
        text,
    })
}

pub fn units(catalog: &Catalog, dimension: &str) -> Result<Report, CliError> {
    let registry = registry(catalog, dimension)?;

    let mut lines = Vec::with_capacity(registry.len());
    let mut rows = Vec::with_capacity(registry.len());
    for (unit, transform) in registry.iter() {
        let marker = if transform.has_offset() { "  (offset: delta conversion differs)" } else { "" };
        lines.push(format!("{:<8} scale {:<14} offset {}{}", unit, transform.scale(), transform.offset(), marker));
        rows.push(json!({
            "unit": unit,
            "scale": transform.scale(),
            "offset": transform.offset(),
        }));
    }

    Ok(Report {
        text: lines.join("\n"),
        json: json!({
            "dimension": dimension,
            "base_unit": registry.base_unit(),
            "units": rows,
        }),
    })
}

pub fn dimensions(catalog: &Catalog) -> Report {
    let lines: Vec<String> = catalog
        .iter()
        .map(|(name, registry)| format!("{:<12} {} units", name, registry.len()))
        .collect();
    let names: Vec<&str> = catalog.names().collect();

    Report {
        text: lines.join("\n"),
        json: json!({ "dimensions": names }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: &str, from: &str, to: &str) -> ConvertArgs {
        ConvertArgs {
            value: value.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            ..ConvertArgs::default()
        }
    }

    #[test]
    fn test_convert_finds_dimension() {
        let report = convert(&Catalog::builtin(), &args("25", "ºC", "°F")).unwrap();
        assert_eq!(report.text, "25 ºC = 77.000000 °F");
        assert_eq!(report.json["dimension"], "Temperature");
        assert_eq!(report.json["delta_relevant"], true);
    }

    #[test]
    fn test_convert_delta() {
        let mut a = args("10", "ºC", "°F");
        a.delta = true;
        let report = convert(&Catalog::builtin(), &a).unwrap();
        assert_eq!(report.text, "10 ºC = 18.000000 °F");
    }

    #[test]
    fn test_convert_swap() {
        let mut a = args("1", "m", "mi");
        a.swap = true;
        let report = convert(&Catalog::builtin(), &a).unwrap();
        assert_eq!(report.text, "1 mi = 1.609344e+03 m");
    }

    #[test]
    fn test_convert_explicit_dimension() {
        let mut a = args("1", "kg", "lb");
        a.dimension = Some("weight".to_string());
        let report = convert(&Catalog::builtin(), &a).unwrap();
        assert_eq!(report.json["dimension"], "weight");
        assert_eq!(report.json["formatted"], "2.204620");
    }

    #[test]
    fn test_dimension_alias() {
        let mut a = args("1", "kg", "g");
        a.dimension = Some("mass".to_string());
        let report = convert(&Catalog::builtin(), &a).unwrap();
        assert_eq!(report.text, "1 kg = 1.000000e+03 g");

        let report = units(&Catalog::builtin(), "mass").unwrap();
        assert!(report.text.lines().next().unwrap().starts_with("kg"));
    }

    #[test]
    fn test_convert_input_errors() {
        let catalog = Catalog::builtin();
        let err = convert(&catalog, &args("  ", "m", "ft")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a value to convert.");
        let err = convert(&catalog, &args("abc", "m", "ft")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number.");
    }

    #[test]
    fn test_convert_unknown_units() {
        let catalog = Catalog::builtin();
        let err = convert(&catalog, &args("1", "m", "kg")).unwrap_err();
        assert!(matches!(err, CliError::Conversion(ConversionError::UnknownUnit { .. })));
        assert_eq!(err.to_string(), "Invalid units: m, kg");

        let mut a = args("1", "m", "nope");
        a.dimension = Some("Length".to_string());
        let err = convert(&catalog, &a).unwrap_err();
        assert_eq!(err.to_string(), "Invalid units: m, nope");
    }

    #[test]
    fn test_convert_unknown_dimension() {
        let mut a = args("1", "m", "ft");
        a.dimension = Some("Speed".to_string());
        let err = convert(&Catalog::builtin(), &a).unwrap_err();
        assert!(matches!(err, CliError::Dimension(_)));
    }

    #[test]
    fn test_units_listing() {
        let report = units(&Catalog::builtin(), "temperature").unwrap();
        let first = report.text.lines().next().unwrap();
        assert!(first.starts_with("°F"));
        assert!(first.contains("delta conversion differs"));
        assert_eq!(report.json["base_unit"], "ºC");
        assert_eq!(report.json["units"].as_array().unwrap().len(), 8);

        let report = units(&Catalog::builtin(), "Volume").unwrap();
        assert!(!report.text.contains("delta"));
    }

    #[test]
    fn test_dimensions_listing() {
        let report = dimensions(&Catalog::builtin());
        assert_eq!(report.text.lines().count(), 4);
        assert_eq!(report.json["dimensions"][0], "Temperature");
    }
}
