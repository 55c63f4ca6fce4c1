use crate::filter::filter_by_year_range;
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use watchbox_models::{KindFilter, MediaKind, SearchResultItem, YearRange};
use watchbox_sources::{CatalogError, CatalogSource, SearchPage};

/// Shown when a failure carries no usable message
pub const SEARCH_FAILURE_FALLBACK: &str = "Something went wrong while searching";

pub fn no_matches_message(range: YearRange) -> String {
    format!("No movies found between {} and {}", range.start(), range.end())
}

/// Everything the result list needs to render
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub kind: KindFilter,
    pub year_range: YearRange,
    pub page: u32,
    /// Filtered view, in catalog order
    pub results: Vec<SearchResultItem>,
    /// Estimated matches across all catalog pages
    pub reported_total: u64,
    /// Catalog's own count for the unfiltered query
    pub catalog_total: u64,
    pub is_loading: bool,
    pub last_error: Option<String>,
    /// Pages as fetched, before year filtering
    #[serde(skip)]
    raw_results: Vec<SearchResultItem>,
    /// Catalog entries received so far, counting repeats and unsupported types
    #[serde(skip)]
    fetched: u64,
    /// Set once a later page came back empty
    #[serde(skip)]
    exhausted: bool,
}

impl SearchState {
    /// The catalog still has pages this state has not fetched
    fn more_pages_available(&self) -> bool {
        !self.exhausted && self.fetched < self.catalog_total
    }
}

/// A search that has been started but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    pub query: String,
    pub page: u32,
    pub kind: Option<MediaKind>,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the query, filters, pagination cursor and result list for one search stream
pub struct SearchController<C: CatalogSource> {
    catalog: Arc<C>,
    state: SearchState,
    generation: u64,
    current_year: Option<i32>,
}

impl<C: CatalogSource> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            state: SearchState { page: 1, ..SearchState::default() },
            generation: 0,
            current_year: None,
        }
    }

    /// Pin the year used for open-ended runs instead of reading the clock
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.state.results
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| chrono::Local::now().year())
    }

    /// Store the query text. Returns true when it became empty and results were cleared.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        self.state.query = query.into();
        if self.state.query.trim().is_empty() {
            self.reset_results();
            return true;
        }
        false
    }

    pub fn set_kind(&mut self, kind: KindFilter) {
        self.state.kind = kind;
    }

    /// Store a new year range and re-filter what is already in memory (no fetch)
    pub fn set_year_range(&mut self, range: YearRange) {
        if self.state.year_range == range {
            return;
        }
        self.state.year_range = range;
        if !self.state.raw_results.is_empty() {
            debug!(operation = "refilter", range = %range, "Re-filtering results in memory");
            self.apply_filter(true);
        }
    }

    pub fn reset_results(&mut self) {
        self.state.results.clear();
        self.state.raw_results.clear();
        self.state.reported_total = 0;
        self.state.catalog_total = 0;
        self.state.fetched = 0;
        self.state.exhausted = false;
        self.state.page = 1;
        self.state.last_error = None;
    }

    /// Start a fetch for `page`. Returns `None` (after clearing results) when the query is blank.
    pub fn begin(&mut self, page: u32) -> Option<SearchTicket> {
        let query = self.state.query.trim().to_string();
        if query.is_empty() {
            self.reset_results();
            return None;
        }

        self.generation += 1;
        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.page = page.max(1);

        Some(SearchTicket {
            generation: self.generation,
            query,
            page: self.state.page,
            kind: self.state.kind.as_kind(),
        })
    }

    /// Apply a finished fetch. Returns false when the ticket was superseded and discarded.
    pub fn complete(&mut self, ticket: SearchTicket, result: Result<SearchPage, CatalogError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                operation = "search",
                stale_generation = ticket.generation,
                latest_generation = self.generation,
                "Discarding stale search response"
            );
            return false;
        }

        self.state.is_loading = false;

        match result {
            Ok(page) => {
                let fetched = page.items.len();
                let returned = page.returned();
                if ticket.page == 1 {
                    self.state.fetched = returned;
                    self.state.exhausted = false;
                    self.state.raw_results = page.items;
                } else {
                    self.state.fetched += returned;
                    self.state.exhausted = returned == 0;
                    let seen: HashSet<String> = self.state.raw_results.iter().map(|i| i.id.clone()).collect();
                    self.state
                        .raw_results
                        .extend(page.items.into_iter().filter(|i| !seen.contains(&i.id)));
                }
                self.state.catalog_total = page.total_results;
                self.apply_filter(ticket.page == 1);
                info!(
                    operation = "search",
                    query = %ticket.query,
                    page = ticket.page,
                    fetched = fetched,
                    shown = self.state.results.len(),
                    estimated_total = self.state.reported_total,
                    "Search page applied"
                );
            }
            Err(err) => {
                if err.is_not_found() {
                    info!(operation = "search", query = %ticket.query, page = ticket.page, "Catalog reported no results: {}", err);
                } else {
                    warn!(operation = "search", query = %ticket.query, page = ticket.page, "Search failed: {}", err);
                }
                let message = err.user_message();
                self.state.last_error = Some(if message.trim().is_empty() {
                    SEARCH_FAILURE_FALLBACK.to_string()
                } else {
                    message
                });
                self.state.results.clear();
                self.state.raw_results.clear();
                self.state.reported_total = 0;
                self.state.catalog_total = 0;
                self.state.fetched = 0;
                self.state.exhausted = false;
            }
        }
        true
    }

    fn apply_filter(&mut self, report_empty: bool) {
        let range = self.state.year_range;
        let outcome = filter_by_year_range(&self.state.raw_results, range, self.state.catalog_total, self.current_year());
        self.state.results = outcome.filtered;
        self.state.reported_total = outcome.estimated_total;
        self.state.last_error = if report_empty && self.state.results.is_empty() {
            Some(no_matches_message(range))
        } else {
            None
        };
    }

    /// Fetch `page` and apply it. Returns true when state was updated from the catalog.
    pub async fn search(&mut self, page: u32) -> bool {
        let Some(ticket) = self.begin(page) else {
            return false;
        };
        let result = self.catalog.search(&ticket.query, ticket.page, ticket.kind).await;
        self.complete(ticket, result)
    }

    /// More results exist and no fetch is in flight
    pub fn can_load_more(&self) -> bool {
        !self.state.is_loading
            && !self.state.query.trim().is_empty()
            && (self.state.results.len() as u64) < self.state.reported_total
            && self.state.more_pages_available()
    }

    pub fn has_more(&self) -> bool {
        (self.state.results.len() as u64) < self.state.reported_total && self.state.more_pages_available()
    }

    /// Scroll-proximity trigger: the cursor at `index` is within `threshold` rows of the end
    pub fn should_load_more(&self, index: usize, threshold: usize) -> bool {
        index.saturating_add(threshold) >= self.state.results.len() && self.can_load_more()
    }

    pub fn begin_load_more(&mut self) -> Option<SearchTicket> {
        if !self.can_load_more() {
            return None;
        }
        self.begin(self.state.page + 1)
    }

    /// Fetch the next page. No-op while loading or once every match has been shown.
    pub async fn load_more(&mut self) -> bool {
        let Some(ticket) = self.begin_load_more() else {
            debug!(operation = "load_more", "Nothing more to load");
            return false;
        };
        let result = self.catalog.search(&ticket.query, ticket.page, ticket.kind).await;
        self.complete(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, FakeCatalog};

    fn controller(catalog: FakeCatalog) -> (Arc<FakeCatalog>, SearchController<FakeCatalog>) {
        let catalog = Arc::new(catalog);
        let controller = SearchController::new(catalog.clone()).with_current_year(2024);
        (catalog, controller)
    }

    #[tokio::test]
    async fn test_blank_query_clears_without_fetching() {
        let (catalog, mut controller) = controller(FakeCatalog::new());
        controller.set_query("   ");
        assert!(!controller.search(1).await);
        assert!(catalog.search_calls().is_empty());
        assert!(controller.results().is_empty());
        assert_eq!(controller.state().reported_total, 0);
    }

    #[tokio::test]
    async fn test_first_page_replaces_results() {
        let catalog = FakeCatalog::new().with_page(1, vec![movie("tt001", "Test Movie", "2022")], 1);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("Test");
        assert!(controller.search(1).await);

        let state = controller.state();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "Test Movie");
        assert_eq!(state.reported_total, 1);
        assert!(!state.is_loading);
        assert_eq!(state.last_error, None);
        assert_eq!(catalog.search_calls()[0].query, "Test");
    }

    #[tokio::test]
    async fn test_kind_filter_is_forwarded() {
        let catalog = FakeCatalog::new().with_page(1, vec![movie("tt001", "Test Movie", "2022")], 1);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("Test");
        controller.set_kind(KindFilter::Movie);
        controller.search(1).await;

        let calls = catalog.search_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, Some(MediaKind::Movie));
    }

    #[tokio::test]
    async fn test_not_found_surfaces_catalog_message() {
        let catalog = FakeCatalog::new().with_not_found(1, "Movie not found!");
        let (_, mut controller) = controller(catalog);

        controller.set_query("zzzz");
        controller.search(1).await;

        let state = controller.state();
        assert!(state.results.is_empty());
        assert!(state.last_error.as_deref().unwrap().contains("Movie not found!"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_empty_filtered_first_page_reports_range() {
        let catalog = FakeCatalog::new().with_page(1, vec![movie("tt001", "Old", "1950")], 1);
        let (_, mut controller) = controller(catalog);

        controller.set_query("Old");
        controller.set_year_range(YearRange::new(1990, 2000).unwrap());
        controller.search(1).await;

        assert_eq!(
            controller.state().last_error.as_deref(),
            Some("No movies found between 1990 and 2000")
        );
    }

    #[tokio::test]
    async fn test_load_more_appends_next_page() {
        let page1: Vec<_> = (0..10).map(|i| movie(&format!("tt{:03}", i), "A", "2001")).collect();
        let page2: Vec<_> = (10..15).map(|i| movie(&format!("tt{:03}", i), "B", "2002")).collect();
        let catalog = FakeCatalog::new().with_page(1, page1, 15).with_page(2, page2, 15);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("A");
        controller.search(1).await;
        assert_eq!(controller.state().reported_total, 15);
        assert!(controller.has_more());

        assert!(controller.load_more().await);
        assert_eq!(controller.results().len(), 15);
        assert_eq!(controller.state().page, 2);
        assert_eq!(catalog.search_calls()[1].page, 2);

        // everything shown, nothing further to fetch
        assert!(!controller.load_more().await);
        assert_eq!(catalog.search_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_when_all_shown_does_not_fetch() {
        let catalog = FakeCatalog::new().with_page(1, vec![movie("tt001", "Test Movie", "2022")], 1);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("Test");
        controller.search(1).await;
        assert_eq!(controller.results().len() as u64, controller.state().reported_total);

        assert!(!controller.load_more().await);
        assert_eq!(catalog.search_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_load_more_skips_duplicate_ids() {
        let catalog = FakeCatalog::new()
            .with_page(1, vec![movie("tt1", "A", "2001"), movie("tt2", "B", "2001")], 4)
            .with_page(2, vec![movie("tt2", "B", "2001"), movie("tt3", "C", "2001")], 4);
        let (_, mut controller) = controller(catalog);

        controller.set_query("x");
        controller.search(1).await;
        controller.load_more().await;

        let ids: Vec<&str> = controller.results().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
    }

    #[tokio::test]
    async fn test_repeated_id_on_last_page_stops_paging() {
        let catalog = FakeCatalog::new()
            .with_page(1, vec![movie("tt1", "A", "2001"), movie("tt2", "B", "2001")], 4)
            .with_page(2, vec![movie("tt2", "B", "2001"), movie("tt3", "C", "2001")], 4);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("x");
        controller.search(1).await;
        assert!(controller.load_more().await);
        assert_eq!(controller.results().len(), 3);
        assert!(!controller.has_more());
        assert!(!controller.can_load_more());

        // page 3 does not exist; asking for it would wipe the list
        assert!(!controller.load_more().await);
        assert_eq!(catalog.search_calls().len(), 2);
        assert_eq!(controller.results().len(), 3);
        assert_eq!(controller.state().last_error, None);
    }

    #[tokio::test]
    async fn test_skipped_entries_count_toward_fetched_pages() {
        let (_, mut controller) = controller(FakeCatalog::new());
        controller.set_query("x");

        let ticket = controller.begin(1).unwrap();
        let page = SearchPage {
            items: vec![movie("tt1", "A", "2001"), movie("tt2", "B", "2001")],
            total_results: 3,
            skipped: 1,
        };
        assert!(controller.complete(ticket, Ok(page)));

        assert_eq!(controller.results().len(), 2);
        assert_eq!(controller.state().reported_total, 3);
        assert!(!controller.can_load_more());
        assert!(controller.begin_load_more().is_none());
    }

    #[tokio::test]
    async fn test_empty_later_page_marks_catalog_exhausted() {
        let catalog = FakeCatalog::new()
            .with_page(1, vec![movie("tt1", "A", "2001")], 5)
            .with_page(2, Vec::new(), 5);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("x");
        controller.search(1).await;
        assert!(controller.load_more().await);

        assert!(!controller.has_more());
        assert!(!controller.load_more().await);
        assert_eq!(catalog.search_calls().len(), 2);
        assert_eq!(controller.results().len(), 1);
    }

    #[tokio::test]
    async fn test_load_more_ignored_while_loading() {
        let catalog = FakeCatalog::new().with_page(1, (0..10).map(|i| movie(&i.to_string(), "A", "2001")).collect(), 30);
        let (_, mut controller) = controller(catalog);
        controller.set_query("A");
        controller.search(1).await;

        let ticket = controller.begin_load_more().unwrap();
        assert!(controller.is_loading());
        assert!(controller.begin_load_more().is_none());
        assert!(!controller.load_more().await);
        assert_eq!(ticket.page, 2);
    }

    #[tokio::test]
    async fn test_year_range_change_refilters_without_fetch() {
        let items = vec![movie("a", "A", "1985"), movie("b", "B", "1995"), movie("c", "C", "2015")];
        let catalog = FakeCatalog::new().with_page(1, items, 3);
        let (catalog, mut controller) = controller(catalog);

        controller.set_query("x");
        controller.search(1).await;
        assert_eq!(controller.results().len(), 3);

        controller.set_year_range(YearRange::new(1990, 2000).unwrap());
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.results()[0].id, "b");
        assert_eq!(controller.state().reported_total, 1);

        controller.set_year_range(YearRange::new(2020, 2024).unwrap());
        assert!(controller.results().is_empty());
        assert_eq!(controller.state().last_error.as_deref(), Some("No movies found between 2020 and 2024"));

        controller.set_year_range(YearRange::new(1970, 2024).unwrap());
        assert_eq!(controller.results().len(), 3);
        assert_eq!(controller.state().last_error, None);
        assert_eq!(catalog.search_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (_, mut controller) = controller(FakeCatalog::new());
        controller.set_query("first");
        let stale = controller.begin(1).unwrap();
        controller.set_query("second");
        let fresh = controller.begin(1).unwrap();
        assert!(fresh.generation() > stale.generation());

        let fresh_page = SearchPage::new(vec![movie("new", "New", "2001")], 1);
        assert!(controller.complete(fresh, Ok(fresh_page)));

        let stale_page = SearchPage::new(vec![movie("old", "Old", "2001")], 1);
        assert!(!controller.complete(stale, Ok(stale_page)));

        assert_eq!(controller.results()[0].id, "new");
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_clearing_query_resets_state() {
        let catalog = FakeCatalog::new().with_page(1, vec![movie("tt001", "Test Movie", "2022")], 1);
        let (_, mut controller) = controller(catalog);
        controller.set_query("Test");
        controller.search(1).await;

        assert!(controller.set_query(""));
        assert!(controller.results().is_empty());
        assert_eq!(controller.state().reported_total, 0);
        assert_eq!(controller.state().page, 1);
    }

    #[tokio::test]
    async fn test_should_load_more_near_end() {
        let catalog = FakeCatalog::new().with_page(1, (0..10).map(|i| movie(&i.to_string(), "A", "2001")).collect(), 30);
        let (_, mut controller) = controller(catalog);
        controller.set_query("A");
        controller.search(1).await;

        assert!(!controller.should_load_more(2, 3));
        assert!(controller.should_load_more(7, 3));
        assert!(controller.should_load_more(9, 3));
    }
}
