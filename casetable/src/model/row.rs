//! Dynamic row record

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Value;
use crate::error::FieldError;

/// One displayable entity, such as a client or a case.
///
/// Rows hold field values as a `HashMap<String, Value>` plus an optional
/// stable identifier. The table never interprets a row beyond looking fields
/// up by key, and never mutates one.
///
/// # Example
///
/// ```
/// use casetable::model::Row;
///
/// let row = Row::with_id("17")
///     .set("case_title", "State v. Khan")
///     .set("hearings", 3i64);
///
/// assert_eq!(row.id(), Some("17"));
/// assert_eq!(row.get_string("case_title").unwrap(), Some("State v. Khan"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// The stable identifier of the row, if the source provided one.
    pub(crate) id: Option<String>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row without an identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty row with the given identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    /// Returns the stable identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the stable identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Iterates over the string-typed field values.
    pub fn string_values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().filter_map(Value::as_str)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the field is missing or cannot be read as the type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a field as a decimal amount.
    ///
    /// Accepts any numeric variant and numeric text.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(other) => other
                .as_decimal()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "decimal", other.type_name())),
        }
    }

    /// Gets a field as a calendar date.
    ///
    /// Accepts date variants and `YYYY-MM-DD` / RFC 3339 text.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(other) => other
                .as_date()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a nested record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Row>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(row)) => Ok(Some(row)),
            Some(other) => Err(FieldError::type_mismatch(field, "record", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_string_distinguishes_missing_and_null() {
        let row = Row::new().set("name", "Beta").set("address", Value::Null);

        assert_eq!(row.get_string("name").unwrap(), Some("Beta"));
        assert_eq!(row.get_string("address").unwrap(), None);
        assert!(matches!(
            row.get_string("phone"),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn test_get_string_type_mismatch() {
        let row = Row::new().set("case_count", 4i64);
        let err = row.get_string("case_count").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'case_count' holds int, expected string"
        );
    }

    #[test]
    fn test_get_decimal_reads_text() {
        let row = Row::new().set("fee", "1200.50");
        assert_eq!(row.get_decimal("fee").unwrap(), Some(Decimal::new(120050, 2)));
    }

    #[test]
    fn test_string_values_only_yields_strings() {
        let row = Row::new()
            .set("name", "Alpha")
            .set("fee", 300i64)
            .set("client", Row::new().set("name", "Nested"));
        let values: Vec<&str> = row.string_values().collect();
        assert_eq!(values, vec!["Alpha"]);
    }
}
