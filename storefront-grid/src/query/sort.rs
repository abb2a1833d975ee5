//! Stable value ordering.

use std::cmp::Ordering;

use serde_json::Value;

use super::Direction;
use super::SortSpec;
use crate::column::resolve;
use crate::model::Row;

/// Orders two resolved values.
///
/// Values of different kinds order as missing/null < booleans < numbers <
/// strings < arrays/objects. Strings compare case-insensitively; arrays and
/// objects compare equal among themselves.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

/// Sorts row positions by `spec`, keeping equal rows in their current order.
pub(super) fn sort_indices(indices: &mut [usize], rows: &[Row], spec: &SortSpec) {
    indices.sort_by(|&a, &b| {
        let ord = compare_values(resolve(&rows[a], &spec.field), resolve(&rows[b], &spec.field));
        match spec.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn prices(rows: &[Row], indices: &[usize]) -> Vec<i64> {
        indices
            .iter()
            .map(|&i| rows[i].get("price").and_then(|v| v.as_i64()).unwrap())
            .collect()
    }

    #[test]
    fn test_numeric_asc_then_desc() {
        let rows: Vec<Row> = [(1, 30), (2, 10), (3, 20)]
            .iter()
            .map(|(id, price)| Row::new(*id).set("price", *price))
            .collect();
        let mut indices = vec![0, 1, 2];
        sort_indices(&mut indices, &rows, &SortSpec::asc("price"));
        assert_eq!(prices(&rows, &indices), vec![10, 20, 30]);
        sort_indices(&mut indices, &rows, &SortSpec::new("price", Direction::Desc));
        assert_eq!(prices(&rows, &indices), vec![30, 20, 10]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let rows: Vec<Row> = [(1, "b"), (2, "a"), (3, "B"), (4, "a")]
            .iter()
            .map(|(id, name)| Row::new(*id).set("name", *name))
            .collect();
        let mut indices = vec![0, 1, 2, 3];
        sort_indices(&mut indices, &rows, &SortSpec::asc("name"));
        assert_eq!(indices, vec![1, 3, 0, 2]);

        let mut indices = vec![0, 1, 2, 3];
        sort_indices(&mut indices, &rows, &SortSpec::new("name", Direction::Desc));
        assert_eq!(indices, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_mixed_kinds() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(null)), None), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!(true)), Some(&json!(0))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("1")), Some(&json!(2))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!([1])), Some(&json!({"a": 1}))), Ordering::Equal);
    }

    #[test]
    fn test_floats_and_ints_compare() {
        assert_eq!(compare_values(Some(&json!(2.5)), Some(&json!(3))), Ordering::Less);
    }
}
