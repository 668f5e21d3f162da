//! Value enum for dynamic field values

use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Money;
use super::Row;

/// A dynamic value held by one field of a [`Row`].
///
/// Rows arriving from the data source are plain JSON objects, so most values
/// are `String`, `Int`, `Float` or `Null`. The typed variants exist for callers
/// that build rows in code or normalize them before handing them over.
///
/// Only [`Value::String`] takes part in free-text search.
///
/// # Example
///
/// ```
/// use casetable::model::Value;
///
/// let title = Value::from("State v. Khan");
/// let hearings = Value::from(3i64);
/// let empty = Value::Null;
/// assert!(title.is_string());
/// assert!(!hearings.is_string());
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Monetary value.
    Money(Money),
    /// Nested record (a related entity joined onto the row).
    Record(Box<Row>),
    /// List of values.
    List(Vec<Value>),
    /// Fallback for JSON the other variants cannot hold.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value is string-typed.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested record if this is a record value.
    pub fn as_record(&self) -> Option<&Row> {
        match self {
            Value::Record(row) => Some(row),
            _ => None,
        }
    }

    /// Interprets the value as a decimal amount.
    ///
    /// Numeric variants convert directly; strings are parsed, since amounts
    /// stored as text are common in form-fed tables.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Float(f) => Decimal::try_from(*f).ok(),
            Value::Decimal(d) => Some(*d),
            Value::Money(m) => Some(m.value()),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }

    /// Interprets the value as a calendar date.
    ///
    /// Accepts `Date`, `DateTime`, and strings in `YYYY-MM-DD` or RFC 3339 form.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date_naive()),
            Value::String(s) => {
                let s = s.trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
                    DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc).date_naive())
                })
            }
            _ => None,
        }
    }

    /// Returns a human-readable rendering, or `None` for null.
    ///
    /// A nested record displays as its `name` field, falling back to its id.
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M").to_string()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Value::Money(m) => Some(m.to_string()),
            Value::Record(row) => row
                .get("name")
                .and_then(Value::display)
                .or_else(|| row.id().map(str::to_string)),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().filter_map(Value::display).collect();
                Some(parts.join(", "))
            }
            Value::Json(json) => Some(json.to_string()),
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Money(_) => "money",
            Value::Record(_) => "record",
            Value::List(_) => "list",
            Value::Json(_) => "json",
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

impl From<Row> for Value {
    fn from(v: Row) -> Self {
        Value::Record(Box::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Converts JSON as delivered by the data source.
///
/// Strings stay strings even when they look like dates, so they remain
/// searchable. Objects become nested records and arrays become lists.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(Box::new(Row::from_json_map(map))),
        }
    }
}
