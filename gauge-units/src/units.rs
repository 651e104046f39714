//! Built-in unit tables
//!
//! Scales are "units per base unit": value_unit = value_base * scale + offset.
//! Base units: ºC, m, kg, L.

use std::sync::LazyLock;
use gauge_core::Registry;

/// Temperature scales, relative to Celsius
pub static TEMPERATURE: LazyLock<Registry> = LazyLock::new(|| builtin(TEMPERATURE_TABLE));

/// Length units, relative to the meter
pub static LENGTH: LazyLock<Registry> = LazyLock::new(|| builtin(LENGTH_TABLE));

/// Weight (mass) units, relative to the kilogram
pub static WEIGHT: LazyLock<Registry> = LazyLock::new(|| builtin(WEIGHT_TABLE));

/// Volume units, relative to the liter
pub static VOLUME: LazyLock<Registry> = LazyLock::new(|| builtin(VOLUME_TABLE));

type Table = &'static [(&'static str, f64, f64)];

fn builtin(table: Table) -> Registry {
    Registry::from_entries(table.iter().map(|&(unit, scale, offset)| (unit, (scale, offset))))
        .expect("built-in unit tables are valid")
}

const TEMPERATURE_TABLE: Table = &[
    ("°F", 1.8, 32.0),
    ("ºC", 1.0, 0.0),
    ("K", 1.0, 273.15),
    ("ºR", 1.8, 491.67),
    ("ºD", -1.5, 150.0),
    ("ºRe", 0.8, 0.0),
    ("ºN", 0.33, 0.0),
    ("ºRø", 21.0 / 40.0, 7.5),
];

const LENGTH_TABLE: Table = &[
    // SI
    ("m", 1.0, 0.0),
    ("dam", 0.1, 0.0),
    ("hm", 0.01, 0.0),
    ("km", 0.001, 0.0),
    ("Mm", 1e-6, 0.0),
    ("Gm", 1e-9, 0.0),
    ("Tm", 1e-12, 0.0),
    ("Pm", 1e-15, 0.0),
    ("Em", 1e-18, 0.0),
    ("Zm", 1e-21, 0.0),
    ("Ym", 1e-24, 0.0),
    ("dm", 10.0, 0.0),
    ("cm", 100.0, 0.0),
    ("mm", 1000.0, 0.0),
    ("µm", 1e6, 0.0),
    ("nm", 1e9, 0.0),
    ("pm", 1e12, 0.0),
    ("fm", 1e15, 0.0),
    ("am", 1e18, 0.0),
    ("zm", 1e21, 0.0),
    ("ym", 1e24, 0.0),
    // Imperial / US
    ("in", 39.3700787, 0.0),
    ("ft", 3.2808399, 0.0),
    ("yd", 1.0936133, 0.0),
    ("mi", 0.000621371192, 0.0),
    ("nmi", 1.0 / 1852.0, 0.0),
    ("fath", 1.0 / 1.8288, 0.0),
    ("ch", 1.0 / 20.1168, 0.0),
    ("lea", 1.0 / 5556.0, 0.0),
    // Astronomical
    ("au", 1.0 / 1.495978707e11, 0.0),
    ("ly", 1.0 / 9.4607e15, 0.0),
    ("pc", 1.0 / 3.085677581e16, 0.0),
    ("kpc", 1.0 / 3.085677581e19, 0.0),
    ("Mpc", 1.0 / 3.085677581e22, 0.0),
    ("Gpc", 1.0 / 3.085677581e25, 0.0),
    ("Tpc", 1.0 / 3.085677581e28, 0.0),
    ("Ppc", 1.0 / 3.085677581e31, 0.0),
    ("Epc", 1.0 / 3.085677581e34, 0.0),
    ("Zpc", 1.0 / 3.085677581e37, 0.0),
    ("Ypc", 1.0 / 3.085677581e40, 0.0),
];

const WEIGHT_TABLE: Table = &[
    ("kg", 1.0, 0.0),
    ("g", 1000.0, 0.0),
    ("mg", 1_000_000.0, 0.0),
    ("lb", 2.20462, 0.0),
    ("oz", 35.274, 0.0),
    ("st", 0.157473, 0.0),
    ("ton", 0.001, 0.0),
    ("uston", 0.00110231, 0.0),
];

const VOLUME_TABLE: Table = &[
    ("L", 1.0, 0.0),
    ("mL", 1000.0, 0.0),
    ("m³", 0.001, 0.0),
    ("gal", 0.264172, 0.0),
    ("qt", 1.05669, 0.0),
    ("pt", 2.11338, 0.0),
    ("fl_oz", 33.814, 0.0),
    ("cup", 4.16667, 0.0),
];
