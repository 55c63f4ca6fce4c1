use super::prompts;
use super::ui::LoadingIndicator;
use super::{build_catalog, load_config, resolve_paths};
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use owo_colors::OwoColorize;
use std::sync::Arc;
use watchbox_core::{Action, SearchState, Session};
use watchbox_models::KindFilter;
use watchbox_sources::CatalogSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Search,
    Kind,
    Years,
    OpenResult,
    LoadMore,
    Watchlist,
    Quit,
}

impl MenuEntry {
    fn label(&self, state: &SearchState, watchlist_len: usize) -> String {
        match self {
            MenuEntry::Search if state.query.trim().is_empty() => "Search".to_string(),
            MenuEntry::Search => format!("Search (current: \"{}\")", state.query),
            MenuEntry::Kind => format!("Type filter ({})", state.kind),
            MenuEntry::Years => format!("Year range ({})", state.year_range),
            MenuEntry::OpenResult => "Open a result".to_string(),
            MenuEntry::LoadMore => "Load more".to_string(),
            MenuEntry::Watchlist => format!("Watchlist ({})", watchlist_len),
            MenuEntry::Quit => "Quit".to_string(),
        }
    }
}

fn menu_entries(state: &SearchState, has_more: bool) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Search, MenuEntry::Kind, MenuEntry::Years];
    if !state.results.is_empty() {
        entries.push(MenuEntry::OpenResult);
    }
    if has_more {
        entries.push(MenuEntry::LoadMore);
    }
    entries.push(MenuEntry::Watchlist);
    entries.push(MenuEntry::Quit);
    entries
}

async fn dispatch_with_spinner<C: CatalogSource>(session: &mut Session<C>, action: Action, message: &str) {
    let loading = LoadingIndicator::start(message);
    session.dispatch(action).await;
    loading.finish();
}

fn show_results<C: CatalogSource>(session: &Session<C>, output: &Output) {
    let state = session.search_state();
    if let Some(err) = &state.last_error {
        output.error(err);
    }
    if state.results.is_empty() {
        return;
    }
    output.table(&render::results_table(&state.results, Some(session.watchlist())));
    output.info(render::summary_line(state).dimmed().to_string());
}

fn show_watchlist<C: CatalogSource>(session: &Session<C>, output: &Output) -> Result<()> {
    output.heading("Your watchlist");
    if session.watchlist().is_empty() {
        output.info("Nothing here yet. Open a result and add it.");
    } else {
        output.table(&render::watchlist_table(session.watchlist()));
    }
    prompts::prompt_select("", &["Close"], 0)?;
    Ok(())
}

async fn open_result<C: CatalogSource>(session: &mut Session<C>, threshold: usize, output: &Output) -> Result<()> {
    let titles: Vec<String> = session
        .search_state()
        .results
        .iter()
        .map(|item| format!("{} ({}, {})", item.title, item.release_year, item.kind))
        .collect();
    let index = prompts::prompt_select("Select a title", &titles, 0)?;
    let id = session.search_state().results[index].id.clone();

    // Picking a row close to the end of the list pulls in the next page
    if session.search_controller().should_load_more(index, threshold) {
        dispatch_with_spinner(session, Action::LoadMore, "Loading more results...").await;
    }

    dispatch_with_spinner(session, Action::Select(id), "Fetching details...").await;

    loop {
        let Some(detail) = session.selected_detail() else {
            output.warn("Details are unavailable right now.");
            return Ok(());
        };
        let in_watchlist = session.watchlist().contains(&detail.id);
        output.table(&render::detail_table(detail, in_watchlist));

        let toggle_label = if in_watchlist { "Remove from watchlist" } else { "Add to watchlist" };
        let choice = prompts::prompt_select("Detail", &[toggle_label, "Back"], 0)?;
        if choice != 0 {
            session.dispatch(Action::CloseDetail).await;
            return Ok(());
        }

        session.dispatch(Action::ToggleWatchlist).await;
        if session.is_watchlist_open() {
            show_watchlist(session, output)?;
            session.dispatch(Action::CloseWatchlist).await;
        }
    }
}

pub async fn run_browse(initial_query: Option<String>, output: &Output) -> Result<()> {
    let path_manager = resolve_paths()?;
    let config = load_config(&path_manager)?;
    let bounds = config.year_bounds()?;
    let catalog = Arc::new(build_catalog(&config, &path_manager, output)?);
    let threshold = config.search.load_more_threshold;

    let mut session = Session::new(catalog, bounds);
    session.dispatch(Action::SetKind(config.search.default_kind)).await;

    output.heading("Watchbox: search the movie catalog");

    if let Some(query) = initial_query.filter(|q| !q.trim().is_empty()) {
        session.dispatch(Action::SetQuery(query)).await;
        dispatch_with_spinner(&mut session, Action::Search, "Searching...").await;
        show_results(&session, output);
    }

    loop {
        let entries = menu_entries(session.search_state(), session.search_controller().has_more());
        let labels: Vec<String> = entries
            .iter()
            .map(|e| e.label(session.search_state(), session.watchlist().len()))
            .collect();
        let choice = prompts::prompt_select("What next?", &labels, 0)?;

        match entries[choice] {
            MenuEntry::Search => {
                let current = session.search_state().query.clone();
                let query = prompts::prompt_string("Search titles", Some(&current))?;
                let empty = query.trim().is_empty();
                session.dispatch(Action::SetQuery(query)).await;
                if empty {
                    output.info("Search cleared.");
                    continue;
                }
                dispatch_with_spinner(&mut session, Action::Search, "Searching...").await;
                show_results(&session, output);
            }
            MenuEntry::Kind => {
                let kinds = KindFilter::all();
                let current = kinds.iter().position(|k| *k == session.search_state().kind).unwrap_or(0);
                let index = prompts::prompt_select("Type", &kinds, current)?;
                dispatch_with_spinner(&mut session, Action::SetKind(kinds[index]), "Searching...").await;
                show_results(&session, output);
            }
            MenuEntry::Years => {
                let range = prompts::prompt_year_range(session.search_state().year_range, bounds, output)?;
                session.dispatch(Action::SetYearRange(range)).await;
                show_results(&session, output);
            }
            MenuEntry::OpenResult => open_result(&mut session, threshold, output).await?,
            MenuEntry::LoadMore => {
                dispatch_with_spinner(&mut session, Action::LoadMore, "Loading more results...").await;
                show_results(&session, output);
            }
            MenuEntry::Watchlist => {
                session.dispatch(Action::OpenWatchlist).await;
                show_watchlist(&session, output)?;
                session.dispatch(Action::CloseWatchlist).await;
            }
            MenuEntry::Quit => break,
        }
    }

    if !session.watchlist().is_empty() {
        output.info(format!(
            "Your watchlist had {} title(s); it is not saved between sessions.",
            session.watchlist().len()
        ));
    }
    Ok(())
}
