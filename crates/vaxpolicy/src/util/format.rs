use vaxpolicy_core::model::{FieldKind, ParameterField};
use vaxpolicy_core::{ParameterError, Policy};

/// Format a currency value with a magnitude word (e.g., $3.60 billion)
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "out of range".to_string();
    }
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1e9 {
        format!("{}${:.2} billion", sign, abs_value / 1e9)
    } else if abs_value >= 1e6 {
        format!("{}${:.2} million", sign, abs_value / 1e6)
    } else if abs_value >= 1e3 {
        format!("{}${:.2} thousand", sign, abs_value / 1e3)
    } else {
        format!("{}${:.2}", sign, abs_value)
    }
}

/// Format a fraction as a percentage with one decimal (0.725 -> 72.5%)
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Compact currency for narrow table headers (e.g., $2.1M, $450K, $50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000_000.0 {
        format!("{}${:.1}B", sign, abs_value / 1_000_000_000.0)
    } else if abs_value >= 1_000_000.0 {
        format!("{}${:.0}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${:.0}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs_value)
    }
}

/// Format a parameter value according to what the field measures
pub fn format_field_value(field: ParameterField, value: f64) -> String {
    match field.kind() {
        FieldKind::Rate => format_percentage(value),
        FieldKind::Currency => format_currency(value),
        FieldKind::Count => format!("{value:.0}"),
        FieldKind::Exponent => format!("{value}"),
    }
}

/// Short label for a sweep cell
pub fn format_decision(decision: Option<Policy>) -> String {
    match decision {
        Some(policy) => policy.to_string(),
        None => "Invalid".to_string(),
    }
}

/// One-line description of a failed row
pub fn format_row_error(err: &ParameterError) -> String {
    format!("error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_magnitudes() {
        assert_eq!(format_currency(3_596_068_919.11), "$3.60 billion");
        assert_eq!(format_currency(717_647_459.40), "$717.65 million");
        assert_eq!(format_currency(-334_991_555.98), "-$334.99 million");
        assert_eq!(format_currency(-15_530_095.93), "-$15.53 million");
        assert_eq!(format_currency(2_500.0), "$2.50 thousand");
        assert_eq!(format_currency(12.345), "$12.35");
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::INFINITY), "out of range");
        assert_eq!(format_currency(f64::NAN), "out of range");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.725), "72.5%");
        assert_eq!(format_percentage(0.9), "90.0%");
    }

    #[test]
    fn test_format_compact_currency() {
        assert_eq!(format_compact_currency(150_000_000.0), "$150M");
        assert_eq!(format_compact_currency(2_500_000_000.0), "$2.5B");
        assert_eq!(format_compact_currency(-45_000.0), "-$45K");
    }

    #[test]
    fn test_format_field_value() {
        assert_eq!(
            format_field_value(ParameterField::MandateAdoptionRate, 0.65),
            "65.0%"
        );
        assert_eq!(
            format_field_value(ParameterField::FreedomValue, 400_000_000.0),
            "$400.00 million"
        );
        assert_eq!(format_field_value(ParameterField::BaselineDeaths, 1000.0), "1000");
        assert_eq!(format_field_value(ParameterField::RiskAversion, 1.0), "1");
        assert_eq!(format_field_value(ParameterField::DiminishingFactor, 0.9), "0.9");
    }

    #[test]
    fn test_format_decision() {
        assert_eq!(format_decision(Some(Policy::Mandate)), "Mandate");
        assert_eq!(format_decision(None), "Invalid");
    }
}
