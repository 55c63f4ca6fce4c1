use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::{CatalogSource, SearchPage};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use watchbox_models::{ItemDetail, MediaKind};

/// HTTP client for an OMDb-compatible catalog
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

fn create_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder().user_agent(concat!("watchbox/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| Client::new())
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Option<Duration>) -> Self {
        let base_url = base_url.into();
        info!(base_url = %base_url, timeout_secs = ?timeout.map(|t| t.as_secs()), "Created catalog client");
        Self {
            client: Arc::new(create_client(timeout)),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str, page: u32, kind: Option<MediaKind>) -> Result<SearchPage, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest("search query must not be empty".to_string()));
        }
        if page == 0 {
            return Err(CatalogError::InvalidRequest("page numbers start at 1".to_string()));
        }
        api::search(&self.client, &self.base_url, &self.api_key, query, page, kind).await
    }

    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::InvalidRequest("identifier must not be empty".to_string()));
        }
        api::get_detail(&self.client, &self.base_url, &self.api_key, id).await
    }
}
