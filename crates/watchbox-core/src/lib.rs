pub mod detail;
pub mod filter;
pub mod search;
pub mod session;
pub mod watchlist;

#[cfg(test)]
mod test_support;

pub use detail::{imdb_rating_label, DetailViewer};
pub use filter::{filter_by_year_range, matches_year_range, parse_release_years, FilterOutcome};
pub use search::{no_matches_message, SearchController, SearchState, SearchTicket};
pub use session::{Action, Session};
pub use watchlist::{ToggleOutcome, Watchlist};
