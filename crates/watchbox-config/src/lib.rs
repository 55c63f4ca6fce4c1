pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, Config, ConfigError, SearchConfig, DEFAULT_CATALOG_URL};
pub use credentials::{resolve_api_key, CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, BASE_PATH_ENV};
