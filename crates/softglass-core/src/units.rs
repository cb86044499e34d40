//! Unit conversion utilities
//!
//! The engine measures everything in centimetres and bills in metres and
//! square metres. Label formatting follows the drawing annotations: one
//! decimal place, integers without a fractional part.

/// Centimetres per metre
pub const CM_PER_M: f64 = 100.0;

/// Square centimetres per square metre
pub const CM2_PER_M2: f64 = 10_000.0;

/// Convert a length from centimetres to metres
pub fn cm_to_m(value_cm: f64) -> f64 {
    value_cm / CM_PER_M
}

/// Convert an area from square centimetres to square metres
pub fn cm2_to_m2(value_cm2: f64) -> f64 {
    value_cm2 / CM2_PER_M2
}

/// Format a length in centimetres for a drawing label
///
/// * `value_cm` - Value in centimetres
///
/// Returns an empty string for NaN and infinities.
pub fn format_cm_label(value_cm: f64) -> String {
    if !value_cm.is_finite() {
        return String::new();
    }
    // Adding 0.0 turns a rounded -0.0 into 0.0
    let rounded = (value_cm * 10.0).round() / 10.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{:.0} cm", rounded)
    } else {
        format!("{:.1} cm", rounded)
    }
}

/// Parse a user-entered centimetre value
///
/// Accepts a decimal comma ("12,5") as well as a decimal point.
/// Returns `None` for empty, non-numeric, or non-finite input.
pub fn parse_cm(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(cm_to_m(250.0), 2.5);
        assert_eq!(cm2_to_m2(200.0 * 150.0), 3.0);
    }

    #[test]
    fn test_format_cm_label() {
        assert_eq!(format_cm_label(30.0), "30 cm");
        assert_eq!(format_cm_label(12.46), "12.5 cm");
        assert_eq!(format_cm_label(2.5), "2.5 cm");
        assert_eq!(format_cm_label(99.96), "100 cm");
        assert_eq!(format_cm_label(-0.01), "0 cm");
        assert_eq!(format_cm_label(f64::NAN), "");
    }

    #[test]
    fn test_parse_cm() {
        assert_eq!(parse_cm("12,5"), Some(12.5));
        assert_eq!(parse_cm(" 40 "), Some(40.0));
        assert_eq!(parse_cm(""), None);
        assert_eq!(parse_cm("abc"), None);
        assert_eq!(parse_cm("inf"), None);
    }
}
