use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use watchbox_models::{ItemDetail, MediaKind, SearchResultItem};
use crate::error::CatalogError;

/// One page of search results plus the catalog's count across all pages
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    pub total_results: u64,
    /// Entries on this page the catalog returned but `items` leaves out (unsupported types)
    #[serde(default)]
    pub skipped: u64,
}

impl SearchPage {
    pub fn new(items: Vec<SearchResultItem>, total_results: u64) -> Self {
        Self { items, total_results, skipped: 0 }
    }

    /// Entries the catalog put on this page, counted before any were dropped
    pub fn returned(&self) -> u64 {
        self.items.len() as u64 + self.skipped
    }
}

/// Read-only access to a remote movie catalog.
///
/// Every call is a fresh request: implementations do not retry or cache.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Keyword search. `page` starts at 1; `kind` narrows the catalog query when set.
    async fn search(&self, query: &str, page: u32, kind: Option<MediaKind>) -> Result<SearchPage, CatalogError>;

    /// Full record for one identifier
    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError>;
}
