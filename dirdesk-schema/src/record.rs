use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single directory entry as exchanged with the entity API.
///
/// Records are flat and schemaless: the well-known fields below are looked
/// up by name, everything else is carried through untouched and in the order
/// the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EntityRecord {
    fields: Map<String, Value>,
}

impl EntityRecord {
    pub const ID: &'static str = "_id";
    pub const NAME: &'static str = "name";
    pub const EMAIL: &'static str = "email";
    pub const COMPANY: &'static str = "company";
    pub const ORGANIZATION: &'static str = "organization";
    pub const PHONE: &'static str = "phone";
    pub const PARTNERSHIP_TYPE: &'static str = "partnership_type";
    pub const SERVICE_TYPE: &'static str = "service_type";
    pub const PARTICIPANT_TYPE: &'static str = "participant_type";
    pub const COST_ESTIMATE: &'static str = "cost_estimate";
    pub const REGISTRATION_FEE: &'static str = "registration_fee";
    pub const CREATED_AT: &'static str = "created_at";
    pub const CREATED_BY: &'static str = "created_by";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the field only when it holds a truthy value.
    pub fn present(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| is_truthy(v))
    }

    /// Display text of a present field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.present(name).map(display_value)
    }

    /// Record identifier, stringified when the server sends a number.
    pub fn id(&self) -> Option<String> {
        match self.get(Self::ID)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Parses `created_at` as RFC 3339 or RFC 2822 (the latter covers the
    /// `Tue, 15 Oct 2024 10:00:00 GMT` shape Flask emits).
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.get(Self::CREATED_AT)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .ok()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// JSON truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Plain-text rendering of a scalar value. Integral floats drop the
/// trailing `.0`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
