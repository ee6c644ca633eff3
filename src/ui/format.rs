use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;
use std::fmt::Display;

/// Renders `dt` as its date followed by its time, both in en-US order:
/// `10/15/2024 3:04:05 PM`.
pub fn format_date<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

/// Parses an RFC 3339 or RFC 2822 timestamp and formats it in the local zone.
pub fn format_date_str(raw: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()?;
    Some(format_date(&parsed.with_timezone(&Local)))
}

/// USD with thousands separators and two decimals (`$1,234.50`).
///
/// Absent, zero and NaN amounts all produce an empty string, so a literal
/// zero cannot be told apart from a missing value.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| *a != 0.0 && !a.is_nan()) else {
        return String::new();
    };
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}$∞");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Numeric reading of a JSON value: numbers as-is, strings when they parse.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn falsy_amounts_format_as_empty() {
        assert_eq!(format_currency(None), "");
        assert_eq!(format_currency(Some(0.0)), "");
        assert_eq!(format_currency(Some(f64::NAN)), "");
    }

    #[test]
    fn positive_amounts_have_symbol_and_two_decimals() {
        assert_eq!(format_currency(Some(5.0)), "$5.00");
        assert_eq!(format_currency(Some(1234.5)), "$1,234.50");
        assert_eq!(format_currency(Some(1_000_000.0)), "$1,000,000.00");
        assert_eq!(format_currency(Some(0.005)), "$0.01");
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        assert_eq!(format_currency(Some(-42.1)), "-$42.10");
        assert_eq!(format_currency(Some(-0.001)), "$0.00");
    }

    #[test]
    fn formats_date_then_time() {
        let dt = Utc.with_ymd_and_hms(2024, 10, 5, 15, 4, 5).unwrap();
        assert_eq!(format_date(&dt), "10/5/2024 3:04:05 PM");

        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&midnight), "1/1/2024 12:00:00 AM");
    }

    #[test]
    fn format_date_str_rejects_garbage() {
        assert!(format_date_str("not a date").is_none());
        assert!(format_date_str("2024-10-05T15:04:05Z").is_some());
        assert!(format_date_str("Sat, 05 Oct 2024 15:04:05 GMT").is_some());
    }

    #[test]
    fn numeric_value_reads_numbers_and_numeric_strings() {
        assert_eq!(numeric_value(&serde_json::json!(12.5)), Some(12.5));
        assert_eq!(numeric_value(&serde_json::json!(" 40 ")), Some(40.0));
        assert_eq!(numeric_value(&serde_json::json!("TBD")), None);
    }
}
