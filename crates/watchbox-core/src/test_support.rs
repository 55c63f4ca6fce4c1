use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use watchbox_models::{ItemDetail, MediaKind, SearchResultItem, SourceRating};
use watchbox_sources::{CatalogError, CatalogSource, SearchPage};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub page: u32,
    pub kind: Option<MediaKind>,
}

#[derive(Debug, Clone)]
pub enum SearchReply {
    Page(SearchPage),
    NotFound(String),
}

/// In-memory catalog that records every request it receives
#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<HashMap<u32, SearchReply>>,
    details: Mutex<HashMap<String, ItemDetail>>,
    search_calls: Mutex<Vec<SearchCall>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: u32, items: Vec<SearchResultItem>, total_results: u64) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(page, SearchReply::Page(SearchPage::new(items, total_results)));
        self
    }

    pub fn with_not_found(self, page: u32, message: &str) -> Self {
        self.pages.lock().unwrap().insert(page, SearchReply::NotFound(message.to_string()));
        self
    }

    pub fn with_detail(self, detail: ItemDetail) -> Self {
        self.details.lock().unwrap().insert(detail.id.clone(), detail);
        self
    }

    pub fn search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str, page: u32, kind: Option<MediaKind>) -> Result<SearchPage, CatalogError> {
        self.search_calls.lock().unwrap().push(SearchCall { query: query.to_string(), page, kind });
        match self.pages.lock().unwrap().get(&page).cloned() {
            Some(SearchReply::Page(page)) => Ok(page),
            Some(SearchReply::NotFound(message)) => Err(CatalogError::NotFound(message)),
            None => Err(CatalogError::NotFound("Movie not found!".to_string())),
        }
    }

    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::DetailUnavailable("Incorrect IMDb ID.".to_string()))
    }
}

pub fn movie(id: &str, title: &str, year: &str) -> SearchResultItem {
    SearchResultItem::new(id, title, year, MediaKind::Movie)
}

pub fn detail(id: &str, title: &str) -> ItemDetail {
    ItemDetail {
        id: id.to_string(),
        title: title.to_string(),
        release_year: "2022".to_string(),
        kind: MediaKind::Movie,
        poster_url: None,
        plot: "A test plot.".to_string(),
        director: "Jane Doe".to_string(),
        cast: "A. Actor".to_string(),
        genre: "Drama".to_string(),
        runtime: "120 min".to_string(),
        content_rating: "PG-13".to_string(),
        released: "01 Jan 2022".to_string(),
        writer: "John Doe".to_string(),
        language: "English".to_string(),
        country: "USA".to_string(),
        awards: "N/A".to_string(),
        catalog_rating: "7.5".to_string(),
        catalog_votes: "1,000".to_string(),
        source_ratings: vec![SourceRating {
            source: "Internet Movie Database".to_string(),
            value: "7.5/10".to_string(),
        }],
    }
}
