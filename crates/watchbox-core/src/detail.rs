use std::sync::Arc;
use tracing::{debug, info, warn};
use watchbox_models::ItemDetail;
use watchbox_sources::{CatalogError, CatalogSource};

/// "7.5/10" style label for the catalog's own rating, "N/A" when it has none
pub fn imdb_rating_label(detail: &ItemDetail) -> String {
    match detail.catalog_rating_value() {
        Some(_) => format!("{}/10", detail.catalog_rating.trim()),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    pub id: String,
}

/// Holds the currently displayed detail record.
///
/// Failed lookups never clear what is on screen; they are logged and dropped.
pub struct DetailViewer<C: CatalogSource> {
    catalog: Arc<C>,
    selected: Option<ItemDetail>,
    generation: u64,
}

impl<C: CatalogSource> DetailViewer<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            selected: None,
            generation: 0,
        }
    }

    pub fn selected(&self) -> Option<&ItemDetail> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn begin(&mut self, id: &str) -> DetailTicket {
        self.generation += 1;
        DetailTicket {
            generation: self.generation,
            id: id.trim().to_string(),
        }
    }

    /// Apply a finished lookup. Returns true when the displayed detail changed.
    pub fn complete(&mut self, ticket: DetailTicket, result: Result<ItemDetail, CatalogError>) -> bool {
        if ticket.generation != self.generation {
            debug!(operation = "detail", id = %ticket.id, "Discarding stale detail response");
            return false;
        }
        match result {
            Ok(detail) => {
                info!(operation = "detail", id = %detail.id, title = %detail.title, "Detail loaded");
                self.selected = Some(detail);
                true
            }
            Err(err) => {
                warn!(operation = "detail", id = %ticket.id, "Failed to load detail: {}", err);
                false
            }
        }
    }

    /// Fetch and display the detail for `id`. Always hits the catalog.
    pub async fn select(&mut self, id: &str) -> bool {
        let ticket = self.begin(id);
        let result = self.catalog.fetch_detail(&ticket.id).await;
        self.complete(ticket, result)
    }
}
