use super::ui::LoadingIndicator;
use super::{build_catalog, load_config, resolve_paths};
use crate::output::{Output, OutputFormat};
use crate::render;
use color_eyre::Result;
use serde_json::json;
use std::sync::Arc;
use watchbox_core::{Action, Session};
use watchbox_models::{KindFilter, YearRange};
use watchbox_sources::CatalogSource;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub kind: KindFilter,
    pub range: YearRange,
    /// Number of catalog pages to walk through, at least 1
    pub pages: u32,
}

/// Drive a session through one search, following "load more" up to `request.pages` pages
pub async fn execute<C: CatalogSource>(session: &mut Session<C>, request: &SearchRequest) {
    // Filters go in before the query so they do not trigger a fetch of their own
    session.dispatch(Action::SetKind(request.kind)).await;
    session.dispatch(Action::SetYearRange(request.range)).await;
    session.dispatch(Action::SetQuery(request.query.clone())).await;
    session.dispatch(Action::Search).await;

    for _ in 1..request.pages.max(1) {
        if !session.search_controller().can_load_more() {
            break;
        }
        session.dispatch(Action::LoadMore).await;
    }
}

pub async fn run_search(
    query: String,
    kind: Option<KindFilter>,
    from: Option<i32>,
    to: Option<i32>,
    pages: u32,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Search command started");

    let path_manager = resolve_paths()?;
    let config = load_config(&path_manager)?;
    let bounds = config.year_bounds()?;
    let range = YearRange::within(from.unwrap_or(bounds.start()), to.unwrap_or(bounds.end()), bounds)
        .map_err(|e| color_eyre::eyre::eyre!("Invalid year range: {}", e))?;

    if query.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Search query must not be empty"));
    }

    let catalog = Arc::new(build_catalog(&config, &path_manager, output)?);
    let mut session = Session::new(catalog, bounds);
    let request = SearchRequest {
        query,
        kind: kind.unwrap_or(config.search.default_kind),
        range,
        pages,
    };

    let loading = LoadingIndicator::start(format!("Searching for '{}'...", request.query));
    execute(&mut session, &request).await;
    loading.finish();

    let state = session.search_state();
    match output.format() {
        OutputFormat::Human => {
            if let Some(err) = &state.last_error {
                output.error(err);
            }
            if !state.results.is_empty() {
                output.table(&render::results_table(&state.results, None));
                output.info(render::summary_line(state));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "query": state.query,
                "type": state.kind.label(),
                "year_range": { "start": state.year_range.start(), "end": state.year_range.end() },
                "pages_fetched": state.page,
                "results": state.results,
                "estimated_total": state.reported_total,
                "catalog_total": state.catalog_total,
                "error": state.last_error,
            }));
        }
    }

    Ok(())
}
