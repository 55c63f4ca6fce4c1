use watchbox_models::{SearchResultItem, YearRange};

/// Separators the catalog uses between the first and last year of a run
pub const RANGE_SEPARATORS: [char; 2] = ['–', '-'];

/// Result of filtering one set of catalog results by release year
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub filtered: Vec<SearchResultItem>,
    /// Extrapolated count of matches across every catalog page
    pub estimated_total: u64,
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Split a catalog year string into its numeric start and end.
///
/// A single year yields `(Some(y), None)`. An open-ended run ("2020–") ends in
/// `current_year`. Components that are not numbers come back as `None`.
pub fn parse_release_years(release_year: &str, current_year: i32) -> (Option<i32>, Option<i32>) {
    let raw = release_year.trim();
    match raw.split_once(|c: char| RANGE_SEPARATORS.contains(&c)) {
        Some((start, end)) => {
            let end = if end.trim().is_empty() { Some(current_year) } else { parse_year(end) };
            (parse_year(start), end)
        }
        None => (parse_year(raw), None),
    }
}

/// Whether one release-year string passes the inclusive `range`.
///
/// Runs are kept when their first or last year lands in the range; a run that
/// spans the whole range without either endpoint inside it is dropped.
pub fn matches_year_range(release_year: &str, range: YearRange, current_year: i32) -> bool {
    let (start, end) = parse_release_years(release_year, current_year);
    start.is_some_and(|y| range.contains(y)) || end.is_some_and(|y| range.contains(y))
}

/// Filter `items` to `range` and estimate the cross-page total.
///
/// The catalog cannot filter by year itself, so the estimate scales
/// `reported_total` by the hit rate observed in `items`, never dropping below
/// the number of matches actually seen.
pub fn filter_by_year_range(
    items: &[SearchResultItem],
    range: YearRange,
    reported_total: u64,
    current_year: i32,
) -> FilterOutcome {
    let filtered: Vec<SearchResultItem> = items
        .iter()
        .filter(|item| matches_year_range(&item.release_year, range, current_year))
        .cloned()
        .collect();

    let scaled = if items.is_empty() {
        0
    } else {
        reported_total.saturating_mul(filtered.len() as u64) / items.len() as u64
    };

    FilterOutcome {
        estimated_total: scaled.max(filtered.len() as u64),
        filtered,
    }
}
