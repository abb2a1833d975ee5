//! Dynamic row record

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::RowError;

/// Stable identifier of a [`Row`].
///
/// Storefront resources use integer keys, but string keys are accepted so any
/// JSON `id` that is an integer or a string can be used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Integer identifier.
    Number(i64),
    /// String identifier.
    Text(String),
}

impl RowId {
    /// Extracts an id from a JSON value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RowId::Number),
            Value::String(s) => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }

    /// Converts the id back into JSON.
    pub fn to_json(&self) -> Value {
        match self {
            RowId::Number(n) => Value::from(*n),
            RowId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Number(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Number(v.into())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

/// One record of a resource, as delivered by the backend.
///
/// A row is an arbitrary JSON object with a mandatory `id`. All other
/// attributes are resource specific and only reached through field paths.
///
/// # Example
///
/// ```
/// use storefront_grid::model::Row;
///
/// let row = Row::new(1)
///     .set("name", "Sneaker")
///     .set("price", 59.9);
///
/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Sneaker"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Row {
    id: RowId,
    fields: Map<String, Value>,
}

impl Row {
    /// Creates a row holding only its id.
    pub fn new(id: impl Into<RowId>) -> Self {
        let id = id.into();
        let mut fields = Map::new();
        fields.insert("id".to_string(), id.to_json());
        Self { id, fields }
    }

    /// Builds a row from a JSON value.
    pub fn from_json(value: Value) -> Result<Self, RowError> {
        match value {
            Value::Object(fields) => {
                let id = fields
                    .get("id")
                    .and_then(RowId::from_json)
                    .ok_or(RowError::MissingId)?;
                Ok(Self { id, fields })
            }
            other => Err(RowError::NotAnObject {
                actual: json_type_name(&other),
            }),
        }
    }

    /// Returns the row id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Returns a top-level attribute.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns all top-level attributes, `id` included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Sets a top-level attribute (builder style).
    ///
    /// Setting `id` is ignored; the id is fixed at construction.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a top-level attribute in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if field == "id" {
            return;
        }
        self.fields.insert(field, value.into());
    }

    /// Shallow-merges `patch` into this row, later keys winning.
    ///
    /// The `id` key of the patch is ignored.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.insert(key, value);
        }
    }

    /// Resolves a dot-separated field path, see [`crate::column::resolve`].
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        crate::column::resolve(self, path)
    }
}

impl TryFrom<Value> for Row {
    type Error = RowError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Row::from_json(value)
    }
}

impl From<Row> for Value {
    fn from(row: Row) -> Self {
        Value::Object(row.fields)
    }
}

/// Returns a short JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_numeric_id() {
        let row = Row::from_json(json!({"id": 7, "name": "Nike"})).unwrap();
        assert_eq!(row.id(), &RowId::Number(7));
        assert_eq!(row.get("name"), Some(&json!("Nike")));
    }

    #[test]
    fn test_from_json_string_id() {
        let row = Row::from_json(json!({"id": "a-1"})).unwrap();
        assert_eq!(row.id(), &RowId::from("a-1"));
    }

    #[test]
    fn test_from_json_rejects_missing_id() {
        assert_eq!(
            Row::from_json(json!({"name": "x"})),
            Err(RowError::MissingId)
        );
        assert_eq!(
            Row::from_json(json!({"id": null})),
            Err(RowError::MissingId)
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert_eq!(
            Row::from_json(json!([1, 2])),
            Err(RowError::NotAnObject { actual: "array" })
        );
    }

    #[test]
    fn test_merge_keeps_id() {
        let mut row = Row::new(1).set("name", "old").set("stock", 3);
        let patch = json!({"id": 99, "name": "new"});
        row.merge(patch.as_object().cloned().unwrap());
        assert_eq!(row.id(), &RowId::Number(1));
        assert_eq!(row.get("id"), Some(&json!(1)));
        assert_eq!(row.get("name"), Some(&json!("new")));
        assert_eq!(row.get("stock"), Some(&json!(3)));
    }

    #[test]
    fn test_deserialize_list() {
        let rows: Vec<Row> = serde_json::from_str(r#"[{"id":1},{"id":"b"}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id().to_string(), "b");
    }

    #[test]
    fn test_row_id_ordering() {
        assert!(RowId::Number(2) < RowId::Number(10));
        assert!(RowId::from("a") < RowId::from("b"));
    }
}
