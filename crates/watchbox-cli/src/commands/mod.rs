pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod show;
pub mod ui;

use crate::output::Output;
use color_eyre::Result;
use std::time::Duration;
use watchbox_config::{resolve_api_key, Config, CredentialStore, PathManager, API_KEY_ENV};
use watchbox_sources::OmdbClient;

/// Resolve the config/credentials/log locations
pub fn resolve_paths() -> Result<PathManager> {
    PathManager::new().map_err(|e| color_eyre::eyre::eyre!("{}", e))
}

/// Load and validate the config file, falling back to defaults when it does not exist
pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Build the catalog client. A missing API key is only warned about; the catalog rejects the requests.
pub fn build_catalog(config: &Config, path_manager: &PathManager, output: &Output) -> Result<OmdbClient> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let api_key = match resolve_api_key(std::env::var(API_KEY_ENV).ok(), &cred_store) {
        Some(key) => key,
        None => {
            output.warn(format!(
                "No catalog API key found. Set {} or run 'watchbox config api-key'.",
                API_KEY_ENV
            ));
            String::new()
        }
    };

    let timeout = config.catalog.request_timeout_secs.map(Duration::from_secs);
    Ok(OmdbClient::with_timeout(config.catalog.base_url.clone(), api_key, timeout))
}
