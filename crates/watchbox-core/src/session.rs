use crate::detail::DetailViewer;
use crate::search::{SearchController, SearchState};
use crate::watchlist::{ToggleOutcome, Watchlist};
use std::sync::Arc;
use tracing::debug;
use watchbox_models::{ItemDetail, KindFilter, SearchResultItem, YearRange};
use watchbox_sources::CatalogSource;

/// Everything the presentation layer can ask the session to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetQuery(String),
    /// Re-runs the search from page 1 when a query is present
    SetKind(KindFilter),
    /// Re-filters results already in memory
    SetYearRange(YearRange),
    Search,
    LoadMore,
    Select(String),
    CloseDetail,
    /// Toggle the detail currently on screen
    ToggleWatchlist,
    ToggleWatchlistItem(SearchResultItem),
    OpenWatchlist,
    CloseWatchlist,
}

/// State container for one interactive session.
///
/// Owned by the composition root; all mutation goes through [`Session::dispatch`].
pub struct Session<C: CatalogSource> {
    search: SearchController<C>,
    detail: DetailViewer<C>,
    watchlist: Watchlist,
    watchlist_open: bool,
    year_bounds: YearRange,
}

impl<C: CatalogSource> Session<C> {
    pub fn new(catalog: Arc<C>, year_bounds: YearRange) -> Self {
        let mut search = SearchController::new(catalog.clone());
        search.set_year_range(year_bounds);
        Self {
            search,
            detail: DetailViewer::new(catalog),
            watchlist: Watchlist::new(),
            watchlist_open: false,
            year_bounds,
        }
    }

    /// Pin the year used for open-ended runs
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.search = self.search.with_current_year(year);
        self
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn search_controller(&self) -> &SearchController<C> {
        &self.search
    }

    pub fn selected_detail(&self) -> Option<&ItemDetail> {
        self.detail.selected()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn is_watchlist_open(&self) -> bool {
        self.watchlist_open
    }

    pub fn year_bounds(&self) -> YearRange {
        self.year_bounds
    }

    pub async fn dispatch(&mut self, action: Action) {
        debug!(operation = "dispatch", action = ?action, "Dispatching action");
        match action {
            Action::SetQuery(query) => {
                if self.search.set_query(query) {
                    self.detail.clear();
                }
            }
            Action::SetKind(kind) => {
                let changed = self.search.state().kind != kind;
                self.search.set_kind(kind);
                if changed && !self.search.state().query.trim().is_empty() {
                    self.search.search(1).await;
                }
            }
            Action::SetYearRange(range) => {
                self.search.set_year_range(range.clamp_to(self.year_bounds));
            }
            Action::Search => {
                self.search.search(1).await;
            }
            Action::LoadMore => {
                self.search.load_more().await;
            }
            Action::Select(id) => {
                self.detail.select(&id).await;
            }
            Action::CloseDetail => self.detail.clear(),
            Action::ToggleWatchlist => {
                if let Some(item) = self.detail.selected().map(ItemDetail::to_result_item) {
                    self.toggle(item);
                }
            }
            Action::ToggleWatchlistItem(item) => self.toggle(item),
            Action::OpenWatchlist => self.watchlist_open = true,
            Action::CloseWatchlist => self.watchlist_open = false,
        }
    }

    fn toggle(&mut self, item: SearchResultItem) {
        if let ToggleOutcome::Added { first_entry: true } = self.watchlist.toggle(item) {
            self.watchlist_open = true;
        }
    }
}
