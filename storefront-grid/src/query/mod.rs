//! Query pipeline: search filter then sort over the working dataset.
//!
//! The pipeline never mutates rows. It returns the positions of the rows
//! that make up the filtered dataset, in display order, and is recomputed in
//! full on every state change.
//!
//! - [`Direction`] - ascending or descending order
//! - [`SortSpec`] - the active sort field and direction
//! - [`matches_search`] - the search predicate
//! - [`compare_values`] - the ordering used by sorting

mod order;
mod search;
mod sort;

pub use order::Direction;
pub use order::SortSpec;
pub use search::matches_search;
pub use sort::compare_values;

use crate::column::Column;
use crate::model::Row;

/// Computes the filtered dataset as indices into `rows`.
///
/// `search` must already be lower-cased. Search is applied before sort, and
/// the sort is stable with respect to the filtered order.
pub fn run(rows: &[Row], columns: &[Column], search: &str, sort: Option<&SortSpec>) -> Vec<usize> {
    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_search(row, columns, search))
        .map(|(i, _)| i)
        .collect();

    if let Some(spec) = sort {
        sort::sort_indices(&mut indices, rows, spec);
    }

    log::debug!(
        "query: {} of {} rows match search {:?}, sort {:?}",
        indices.len(),
        rows.len(),
        search,
        sort
    );

    indices
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::from_json(json!({"id": 1, "name": "Zeta", "price": 30})).unwrap(),
            Row::from_json(json!({"id": 2, "name": "alpha", "price": 10})).unwrap(),
            Row::from_json(json!({"id": 3, "name": "ABC123", "price": 20})).unwrap(),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("name", "Name"), Column::new("price", "Price")]
    }

    #[test]
    fn test_no_query_keeps_order() {
        assert_eq!(run(&rows(), &columns(), "", None), vec![0, 1, 2]);
    }

    #[test]
    fn test_search_before_sort() {
        let sort = SortSpec::new("price", Direction::Desc);
        // "a" matches Zeta, alpha and ABC123.
        assert_eq!(run(&rows(), &columns(), "a", Some(&sort)), vec![0, 2, 1]);
        assert_eq!(run(&rows(), &columns(), "abc", Some(&sort)), vec![2]);
    }

    #[test]
    fn test_sort_strings_case_insensitive() {
        let sort = SortSpec::new("name", Direction::Asc);
        assert_eq!(run(&rows(), &columns(), "", Some(&sort)), vec![2, 1, 0]);
    }
}
