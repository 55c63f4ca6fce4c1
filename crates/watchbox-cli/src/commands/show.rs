use super::ui::LoadingIndicator;
use super::{build_catalog, load_config, resolve_paths};
use crate::output::{Output, OutputFormat};
use crate::render;
use color_eyre::Result;
use std::sync::Arc;
use watchbox_core::{imdb_rating_label, DetailViewer};

pub async fn run_show(id: String, output: &Output) -> Result<()> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(color_eyre::eyre::eyre!("An identifier is required, e.g. tt0133093"));
    }

    let path_manager = resolve_paths()?;
    let config = load_config(&path_manager)?;
    let catalog = Arc::new(build_catalog(&config, &path_manager, output)?);
    let mut viewer = DetailViewer::new(catalog);

    let loading = LoadingIndicator::start(format!("Fetching details for {}...", id));
    let loaded = viewer.select(&id).await;
    loading.finish();

    let detail = match viewer.selected() {
        Some(detail) if loaded => detail,
        _ => {
            return Err(color_eyre::eyre::eyre!(
                "Details for {} are unavailable (run with -v for the catalog's response)",
                id
            ))
        }
    };

    match output.format() {
        OutputFormat::Human => output.table(&render::detail_table(detail, false)),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut value = serde_json::to_value(detail)?;
            value["imdb_rating_label"] = serde_json::Value::String(imdb_rating_label(detail));
            output.json(&value);
        }
    }

    Ok(())
}
