//! Safe value extraction and arithmetic over canonical records.
//!
//! Every metric calculator goes through these helpers: field access tolerates
//! nulls, thousands-separated strings and non-finite numbers, and division
//! refuses degenerate denominators instead of raising.

use crate::schema::{CanonicalField, CanonicalRecord, FieldValue};

/// Denominators with a magnitude below this are treated as degenerate.
pub const DEFAULT_MIN_DENOMINATOR: f64 = 0.01;

/// Interprets a populated field value as a number. Strings are stripped of
/// comma separators and surrounding whitespace before parsing; non-finite
/// numbers and parse failures yield `None`.
pub fn parse_numeric(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FieldValue::Text(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
    }
}

/// Numeric view of one canonical field, `None` when the field is null or not
/// interpretable as a finite number.
pub fn numeric(record: &CanonicalRecord, field: CanonicalField) -> Option<f64> {
    record.get(field).and_then(parse_numeric)
}

/// Like [`numeric`] but substituting `default` for missing or malformed
/// values, mirroring the extraction policy every ratio starts from.
pub fn get_value(record: &CanonicalRecord, field: CanonicalField, default: f64) -> f64 {
    numeric(record, field).unwrap_or(default)
}

/// True iff `denominator` is finite and at least `min_denominator` in
/// magnitude.
pub fn can_calculate_ratio(denominator: f64, min_denominator: f64) -> bool {
    denominator.is_finite() && denominator.abs() >= min_denominator
}

/// Division that never raises: degenerate denominators and non-finite
/// results both collapse to `default`.
pub fn safe_divide(numerator: f64, denominator: f64, default: f64, min_denominator: f64) -> f64 {
    if !can_calculate_ratio(denominator, min_denominator) {
        return default;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(field: CanonicalField, value: FieldValue) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.set(field, value);
        record
    }

    #[test]
    fn test_get_value_parses_separated_string() {
        let record = record_with(
            CanonicalField::TotalOperatingRevenue,
            FieldValue::Text("1,234.5".into()),
        );
        assert_eq!(
            get_value(&record, CanonicalField::TotalOperatingRevenue, 0.0),
            1234.5
        );
    }

    #[test]
    fn test_get_value_defaults() {
        let record = CanonicalRecord::new();
        assert_eq!(
            get_value(&record, CanonicalField::TotalOperatingRevenue, 0.0),
            0.0
        );

        let record = record_with(
            CanonicalField::TotalOperatingRevenue,
            FieldValue::Text("  ".into()),
        );
        assert_eq!(
            get_value(&record, CanonicalField::TotalOperatingRevenue, 7.0),
            7.0
        );

        let record = record_with(
            CanonicalField::TotalOperatingRevenue,
            FieldValue::Text("n/a".into()),
        );
        assert_eq!(
            get_value(&record, CanonicalField::TotalOperatingRevenue, 7.0),
            7.0
        );

        let record = record_with(CanonicalField::TotalAssets, FieldValue::Number(f64::NAN));
        assert_eq!(get_value(&record, CanonicalField::TotalAssets, 3.0), 3.0);

        let record = record_with(
            CanonicalField::TotalAssets,
            FieldValue::Number(f64::INFINITY),
        );
        assert_eq!(get_value(&record, CanonicalField::TotalAssets, 3.0), 3.0);
    }

    #[test]
    fn test_can_calculate_ratio_threshold() {
        assert!(can_calculate_ratio(5.0, DEFAULT_MIN_DENOMINATOR));
        assert!(can_calculate_ratio(-0.01, DEFAULT_MIN_DENOMINATOR));
        assert!(!can_calculate_ratio(0.0, DEFAULT_MIN_DENOMINATOR));
        assert!(!can_calculate_ratio(0.005, DEFAULT_MIN_DENOMINATOR));
        assert!(!can_calculate_ratio(f64::NAN, DEFAULT_MIN_DENOMINATOR));
        assert!(!can_calculate_ratio(f64::INFINITY, DEFAULT_MIN_DENOMINATOR));
    }

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(10.0, 5.0, 0.0, DEFAULT_MIN_DENOMINATOR), 2.0);
        assert_eq!(safe_divide(7.0, 0.0, 0.0, DEFAULT_MIN_DENOMINATOR), 0.0);
        assert_eq!(
            safe_divide(f64::NAN, 5.0, 0.0, DEFAULT_MIN_DENOMINATOR),
            0.0
        );
        assert_eq!(
            safe_divide(1.0, f64::NAN, -1.0, DEFAULT_MIN_DENOMINATOR),
            -1.0
        );
        // Near-zero denominators below the guard collapse to the default.
        assert_eq!(safe_divide(1.0, 1e-9, 0.0, DEFAULT_MIN_DENOMINATOR), 0.0);
    }
}
