use dirdesk_schema::EntityRecord;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Field-name fragments that mark a monetary field.
const NUMERIC_MARKERS: [&str; 3] = ["fee", "amount", "cost"];

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid float prefix pattern")
});

/// One named control of a form, as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

pub fn is_numeric_field(name: &str) -> bool {
    NUMERIC_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Reads the longest leading float literal, ignoring leading whitespace and
/// any trailing text (`"12.5 USD"` is `12.5`).
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let literal = FLOAT_PREFIX.find(raw.trim_start())?.as_str();
    literal.parse().ok()
}

/// Builds the outgoing record from form fields.
///
/// Empty values are skipped. Monetary fields are sent as numbers; text that
/// does not start with a number becomes `null`. Later fields with the same
/// name overwrite earlier ones.
pub fn record_from_fields(fields: &[FormField]) -> EntityRecord {
    fields
        .iter()
        .filter(|field| !field.value.is_empty())
        .map(|field| {
            let value = if is_numeric_field(&field.name) {
                parse_float_prefix(&field.value).map_or(Value::Null, Value::from)
            } else {
                Value::String(field.value.clone())
            };
            (field.name.clone(), value)
        })
        .collect()
}
