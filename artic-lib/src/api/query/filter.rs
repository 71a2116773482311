//! Client-side row filters.

use std::fmt;

use crate::model::Artwork;

/// A numeric predicate over [`Artwork`] rows.
///
/// The artworks endpoint has no filter parameters, so a filter is applied to
/// each page after it is fetched. Rows whose year is unknown never match.
///
/// # Example
///
/// ```
/// use artic_lib::api::query::RowFilter;
/// use artic_lib::model::Artwork;
///
/// let filter = RowFilter::min_start_year(1900);
/// assert!(filter.matches(&Artwork::titled("a").with_dates(1942, 1942)));
/// assert!(!filter.matches(&Artwork::titled("b").with_dates(1850, 1851)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// `date_start >= year`
    MinStartYear(i32),
}

impl RowFilter {
    /// Keeps rows that started in or after `year`.
    pub fn min_start_year(year: i32) -> Self {
        RowFilter::MinStartYear(year)
    }

    /// Returns `true` if the row passes the filter.
    pub fn matches(&self, artwork: &Artwork) -> bool {
        match *self {
            RowFilter::MinStartYear(year) => artwork.date_start.is_some_and(|start| start >= year),
        }
    }

    /// Keeps the matching rows, preserving order.
    pub fn apply(&self, records: Vec<Artwork>) -> Vec<Artwork> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::MinStartYear(year) => write!(f, "date_start >= {}", year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Artwork> {
        vec![
            Artwork::titled("old").with_dates(1500, 1510),
            Artwork::titled("undated"),
            Artwork::titled("new").with_dates(1960, 1961),
            Artwork::titled("edge").with_dates(1900, 1905),
        ]
    }

    #[test]
    fn test_min_start_year() {
        let kept = RowFilter::min_start_year(1900).apply(rows());
        let titles: Vec<_> = kept.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, ["new", "edge"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(RowFilter::min_start_year(1900).to_string(), "date_start >= 1900");
    }
}
