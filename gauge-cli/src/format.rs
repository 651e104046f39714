//! Input parsing and result formatting for the terminal

use thiserror::Error;

/// Problems with the number the user typed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a value to convert.")]
    Empty,

    #[error("Please enter a valid number.")]
    Invalid,
}

/// Parse the raw value argument
pub fn parse_input(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed.parse::<f64>().map_err(|_| InputError::Invalid)
}

/// Six decimals, switching to scientific notation outside [0.001, 1000]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if value != 0.0 && (magnitude < 0.001 || magnitude > 1000.0) {
        scientific(value)
    } else {
        format!("{:.6}", value)
    }
}

/// `{:.6e}` with a signed, two-digit exponent (`5.000000e-04`)
fn scientific(value: f64) -> String {
    let raw = format!("{:.6e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

/// `"<value> <from> = <result> <to>"`
pub fn result_line(input: &str, from: &str, result: f64, to: &str) -> String {
    format!("{} {} = {} {}", input.trim(), from, format_number(result), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("2"), Ok(2.0));
        assert_eq!(parse_input("  -40.5 "), Ok(-40.5));
        assert_eq!(parse_input("   "), Err(InputError::Empty));
        assert_eq!(parse_input("abc"), Err(InputError::Invalid));
    }

    #[test]
    fn test_input_messages() {
        assert_eq!(InputError::Empty.to_string(), "Please enter a value to convert.");
        assert_eq!(InputError::Invalid.to_string(), "Please enter a valid number.");
    }

    #[test]
    fn test_fixed_range() {
        assert_eq!(format_number(20.0), "20.000000");
        assert_eq!(format_number(0.001), "0.001000");
        assert_eq!(format_number(1000.0), "1000.000000");
        assert_eq!(format_number(-77.0), "-77.000000");
        assert_eq!(format_number(0.0), "0.000000");
    }

    #[test]
    fn test_scientific_range() {
        assert_eq!(format_number(0.0005), "5.000000e-04");
        assert_eq!(format_number(1609.344), "1.609344e+03");
        assert_eq!(format_number(-2.5e-12), "-2.500000e-12");
        assert_eq!(format_number(1e100), "1.000000e+100");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_result_line() {
        assert_eq!(result_line("2", "A", 20.0, "B"), "2 A = 20.000000 B");
        assert_eq!(result_line("0.0005", "A", 0.0005, "A"), "0.0005 A = 5.000000e-04 A");
    }
}
