use comfy_table::{modifiers, presets, Attribute, Cell, Color, ContentArrangement, Table};
use watchbox_core::{imdb_rating_label, SearchState, Watchlist};
use watchbox_models::{ItemDetail, SearchResultItem};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn poster_label(item: &SearchResultItem) -> &str {
    if item.has_poster() {
        "yes"
    } else {
        "unavailable"
    }
}

/// Numbered result list; a ★ marks entries already on the watchlist
pub fn results_table(results: &[SearchResultItem], watchlist: Option<&Watchlist>) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("Type"), header("Poster"), header("")]);
    for (index, item) in results.iter().enumerate() {
        let starred = watchlist.is_some_and(|w| w.contains(&item.id));
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(&item.release_year),
            Cell::new(item.kind),
            Cell::new(poster_label(item)),
            if starred { Cell::new("★").fg(Color::Yellow) } else { Cell::new("") },
        ]);
    }
    table
}

/// "Showing 10 of ~28 results" style summary for the list footer
pub fn summary_line(state: &SearchState) -> String {
    let shown = state.results.len();
    if shown as u64 >= state.reported_total {
        format!("Showing {} result{} ({})", shown, if shown == 1 { "" } else { "s" }, state.year_range)
    } else {
        format!("Showing {} of ~{} results ({})", shown, state.reported_total, state.year_range)
    }
}

pub fn detail_table(detail: &ItemDetail, in_watchlist: bool) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(&detail.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(format!("{} · {}", detail.release_year, detail.kind)),
    ]);

    let mut rows: Vec<(&str, String)> = vec![
        ("IMDb rating", imdb_rating_label(detail)),
        ("Plot", detail.plot.clone()),
        ("Director", detail.director.clone()),
        ("Cast", detail.cast.clone()),
        ("Genre", detail.genre.clone()),
        ("Runtime", detail.runtime.clone()),
        ("Rated", detail.content_rating.clone()),
        ("Released", detail.released.clone()),
        ("Writer", detail.writer.clone()),
        ("Language", detail.language.clone()),
        ("Country", detail.country.clone()),
        ("Awards", detail.awards.clone()),
        ("Votes", detail.catalog_votes.clone()),
    ];
    for rating in &detail.source_ratings {
        rows.push((rating.source.as_str(), rating.value.clone()));
    }
    rows.push(("Poster", detail.poster_url.clone().unwrap_or_else(|| "unavailable".to_string())));
    rows.push(("Watchlist", if in_watchlist { "★ on your watchlist".to_string() } else { "not added".to_string() }));

    for (label, value) in rows {
        table.add_row(vec![header(label), Cell::new(value)]);
    }
    table
}

pub fn watchlist_table(watchlist: &Watchlist) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("Type")]);
    for (index, item) in watchlist.entries().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(&item.release_year),
            Cell::new(item.kind),
        ]);
    }
    table
}
