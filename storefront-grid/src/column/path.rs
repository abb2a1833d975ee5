//! Field path resolution.

use serde_json::Value;

use crate::model::Row;

/// Resolves a dot-separated `path` against a row.
///
/// Each segment indexes an object by key or an array by position. Returns
/// `None` as soon as a segment cannot be followed; never panics.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use storefront_grid::column::resolve;
/// use storefront_grid::model::Row;
///
/// let row = Row::from_json(json!({"id": 1, "brand": {"name": "Nike"}})).unwrap();
/// assert_eq!(resolve(&row, "brand.name"), Some(&json!("Nike")));
/// assert_eq!(resolve(&row, "brand.logo.url"), None);
/// ```
pub fn resolve<'a>(row: &'a Row, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = row.get(first)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row() -> Row {
        Row::from_json(json!({
            "id": 1,
            "name": "Runner",
            "a": {"b": {"c": 42}},
            "pictures": [{"image_url": "/p/1.webp"}],
            "brand": null
        }))
        .unwrap()
    }

    #[test]
    fn test_nested_value() {
        assert_eq!(resolve(&row(), "a.b.c"), Some(&json!(42)));
    }

    #[test]
    fn test_missing_intermediate() {
        assert_eq!(resolve(&row(), "x.b.c"), None);
        assert_eq!(resolve(&row(), "a.x.c"), None);
        assert_eq!(resolve(&row(), "a.b.x"), None);
    }

    #[test]
    fn test_through_null_or_scalar() {
        assert_eq!(resolve(&row(), "brand.name"), None);
        assert_eq!(resolve(&row(), "name.length"), None);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(resolve(&row(), "pictures.0.image_url"), Some(&json!("/p/1.webp")));
        assert_eq!(resolve(&row(), "pictures.1.image_url"), None);
        assert_eq!(resolve(&row(), "pictures.first"), None);
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(resolve(&row(), ""), None);
    }
}
