//! JSON serialization for rows.
//!
//! Rows arrive from the data source as JSON objects. Every key becomes a field;
//! an `id` key (string or integer) additionally becomes the row's stable
//! identifier. Nested objects become nested rows so relation lookups work.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Row;
use super::Value;
use crate::error::LoadError;

const ID_FIELD: &str = "id";

impl Row {
    /// Builds a row from a JSON object.
    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut row = Row::new();
        for (key, json) in map {
            row.fields.insert(key, Value::from(json));
        }
        row.id = row.fields.get(ID_FIELD).and_then(id_from_value);
        row
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Int(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses a JSON array of objects into rows.
///
/// # Example
///
/// ```
/// let rows = casetable::rows_from_json(r#"[{"id": 1, "name": "Alpha"}]"#).unwrap();
/// assert_eq!(rows[0].id(), Some("1"));
/// ```
pub fn rows_from_json(json: &str) -> Result<Vec<Row>, LoadError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(LoadError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => Ok(Row::from_json_map(map)),
            _ => Err(LoadError::NotAnObject { index }),
        })
        .collect()
}

/// Reads a JSON file holding an array of row objects.
pub fn rows_from_path(path: impl AsRef<Path>) -> Result<Vec<Row>, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    rows_from_json(&json)
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let emit_id = self.id.is_some() && !self.fields.contains_key(ID_FIELD);
        let len = self.fields.len() + usize::from(emit_id);
        let mut map = serializer.serialize_map(Some(len))?;

        if emit_id {
            map.serialize_entry(ID_FIELD, &self.id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a row record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Row, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut raw = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            raw.insert(key, value);
        }
        Ok(Row::from_json_map(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_id() {
        let row: Row = serde_json::from_str(r#"{"id": 7, "name": "Alpha"}"#).unwrap();
        assert_eq!(row.id(), Some("7"));
        assert_eq!(row.get("id"), Some(&Value::Int(7)));
        assert_eq!(row.get_string("name").unwrap(), Some("Alpha"));
    }

    #[test]
    fn test_deserialize_without_id() {
        let row: Row = serde_json::from_str(r#"{"name": "Alpha", "id": null}"#).unwrap();
        assert_eq!(row.id(), None);
    }

    #[test]
    fn test_deserialize_nested_relation() {
        let row: Row =
            serde_json::from_str(r#"{"id": "c1", "clients": {"id": "k9", "name": "Khan"}}"#)
                .unwrap();
        let client = row.get_record("clients").unwrap().unwrap();
        assert_eq!(client.id(), Some("k9"));
    }

    #[test]
    fn test_serialize_emits_explicit_id() {
        let row = Row::with_id("abc").set("name", "Alpha");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["name"], "Alpha");
    }

    #[test]
    fn test_rows_from_json_rejects_non_array() {
        assert!(matches!(
            rows_from_json(r#"{"id": 1}"#),
            Err(LoadError::NotAnArray)
        ));
        assert!(matches!(
            rows_from_json(r#"[{"id": 1}, 3]"#),
            Err(LoadError::NotAnObject { index: 1 })
        ));
    }
}
