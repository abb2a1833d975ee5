//! Pagination over the filtered dataset.

use std::ops::Range;

use crate::error::GridError;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Current page and page size.
///
/// Pages are 1-indexed. The controller does not store the number of rows;
/// every query takes the length of the filtered dataset so the page count is
/// always derived from the latest pipeline run.
///
/// # Example
///
/// ```
/// use storefront_grid::Pagination;
///
/// let mut pages = Pagination::new(10).unwrap();
/// assert_eq!(pages.total_pages(25), 3);
/// assert!(pages.next(25));
/// assert!(pages.next(25));
/// assert!(!pages.next(25));
/// assert_eq!(pages.window(25), 20..25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    rows_per_page: usize,
    current_page: usize,
}

impl Pagination {
    /// Creates pagination on page 1. `rows_per_page` must be positive.
    pub fn new(rows_per_page: usize) -> Result<Self, GridError> {
        check_rows_per_page(rows_per_page)?;
        Ok(Self {
            rows_per_page,
            current_page: 1,
        })
    }

    /// Returns the page size.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Returns the current page (1-indexed).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changes the page size and goes back to page 1.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), GridError> {
        check_rows_per_page(rows_per_page)?;
        self.rows_per_page = rows_per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Goes back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Number of pages for `len` rows; `0` only when there are no rows.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.rows_per_page)
    }

    /// Pulls the current page back into `[1, total_pages]`.
    ///
    /// With no rows the page stays at 1.
    pub fn clamp(&mut self, len: usize) {
        let total = self.total_pages(len);
        if self.current_page > total && total > 0 {
            self.current_page = total;
        }
        if self.current_page < 1 {
            self.current_page = 1;
        }
    }

    /// Row positions of the current page within the filtered dataset.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.rows_per_page).min(len);
        let end = (start + self.rows_per_page).min(len);
        start..end
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists for `len` rows.
    pub fn has_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if self.has_next(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped into the valid range.
    pub fn goto(&mut self, page: usize, len: usize) {
        self.current_page = page.max(1);
        self.clamp(len);
    }

    /// Selector options: the standard sizes plus the current one.
    pub fn size_options(&self) -> Vec<usize> {
        let mut options = PAGE_SIZE_OPTIONS.to_vec();
        if !options.contains(&self.rows_per_page) {
            options.push(self.rows_per_page);
            options.sort_unstable();
        }
        options
    }
}

fn check_rows_per_page(rows_per_page: usize) -> Result<(), GridError> {
    if rows_per_page == 0 {
        return Err(GridError::invalid_config("rows per page must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let pages = Pagination::new(10).unwrap();
        assert_eq!(pages.total_pages(0), 0);
        assert_eq!(pages.total_pages(1), 1);
        assert_eq!(pages.total_pages(10), 1);
        assert_eq!(pages.total_pages(11), 2);
        assert_eq!(pages.total_pages(25), 3);
    }

    #[test]
    fn test_current_page_stays_in_range() {
        for rows_per_page in 1..8 {
            for len in 0..40 {
                for start in 1..12 {
                    let mut pages = Pagination::new(rows_per_page).unwrap();
                    pages.goto(start, 1000);
                    pages.clamp(len);
                    let total = pages.total_pages(len);
                    assert_eq!(total, len.div_ceil(rows_per_page));
                    if total == 0 {
                        assert_eq!(pages.current_page(), 1);
                    } else {
                        assert!((1..=total).contains(&pages.current_page()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_last_page_window() {
        let mut pages = Pagination::new(10).unwrap();
        pages.goto(3, 25);
        assert_eq!(pages.window(25), 20..25);
        assert!(!pages.has_next(25));
        assert!(pages.has_previous());
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut pages = Pagination::new(10).unwrap();
        assert!(!pages.previous());
        assert_eq!(pages.current_page(), 1);
        pages.goto(3, 25);
        assert!(!pages.next(25));
        assert_eq!(pages.current_page(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let mut pages = Pagination::new(10).unwrap();
        pages.clamp(0);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.window(0), 0..0);
        assert!(!pages.has_next(0));
        assert!(!pages.has_previous());
    }

    #[test]
    fn test_set_rows_per_page_resets_page() {
        let mut pages = Pagination::new(10).unwrap();
        pages.goto(3, 25);
        pages.set_rows_per_page(25).unwrap();
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.total_pages(25), 1);
    }

    #[test]
    fn test_zero_rows_per_page_rejected() {
        assert!(Pagination::new(0).is_err());
        let mut pages = Pagination::new(10).unwrap();
        assert!(pages.set_rows_per_page(0).is_err());
        assert_eq!(pages.rows_per_page(), 10);
    }

    #[test]
    fn test_size_options_include_current() {
        assert_eq!(Pagination::new(25).unwrap().size_options(), vec![10, 25, 50, 100]);
        assert_eq!(Pagination::new(5).unwrap().size_options(), vec![5, 10, 25, 50, 100]);
    }
}
