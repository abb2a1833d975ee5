//! Search predicate.

use serde_json::Value;

use crate::column::Column;
use crate::column::resolve;
use crate::model::Row;

/// Returns `true` if `row` matches the lower-cased `query`.
///
/// A row matches when the query is a substring of the lower-cased value of
/// any column. Only string values take part; other values are skipped, not
/// converted. An empty query matches everything.
pub fn matches_search(row: &Row, columns: &[Column], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    columns.iter().any(|column| match resolve(row, &column.field) {
        Some(Value::String(s)) => s.to_lowercase().contains(query),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let row = Row::from_json(json!({"id": 1, "sku": "ABC123"})).unwrap();
        let columns = [Column::new("sku", "SKU")];
        assert!(matches_search(&row, &columns, "abc"));
        assert!(!matches_search(&row, &columns, "abd"));
    }

    #[test]
    fn test_non_string_values_skipped() {
        let row = Row::from_json(json!({"id": 1, "stock": 123, "active": true})).unwrap();
        let columns = [Column::new("stock", "Stock"), Column::new("active", "Active")];
        assert!(!matches_search(&row, &columns, "12"));
        assert!(!matches_search(&row, &columns, "true"));
    }

    #[test]
    fn test_only_column_fields_searched() {
        let row = Row::from_json(json!({"id": 1, "name": "Boot", "secret": "hidden"})).unwrap();
        let columns = [Column::new("name", "Name")];
        assert!(!matches_search(&row, &columns, "hidden"));
    }

    #[test]
    fn test_nested_field_searched() {
        let row = Row::from_json(json!({"id": 1, "brand": {"name": "Adidas"}})).unwrap();
        let columns = [Column::new("brand.name", "Brand")];
        assert!(matches_search(&row, &columns, "adi"));
    }
}
