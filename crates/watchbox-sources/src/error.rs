use thiserror::Error;

/// Message used when the catalog rejects a search without saying why
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "No results found";

/// Message used when an error carries no usable text
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while contacting the catalog";

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered but reported no matches
    #[error("{0}")]
    NotFound(String),

    /// A detail lookup was answered with a negative result marker
    #[error("Detail unavailable: {0}")]
    DetailUnavailable(String),

    /// Rejected locally, before any request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Catalog returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Text suitable for an inline error banner
    pub fn user_message(&self) -> String {
        let message = match self {
            CatalogError::NotFound(msg) | CatalogError::DetailUnavailable(msg) => msg.trim().to_string(),
            other => other.to_string(),
        };
        if message.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}
