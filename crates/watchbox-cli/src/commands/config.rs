use super::{prompts, resolve_paths};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchbox_config::{Config, CredentialStore, PathManager, API_KEY_ENV};

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
        crate::ConfigCommands::ApiKey { key } => configure_api_key(key, output),
    }
}

/// Where the catalog API key is coming from
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeySource {
    Environment(String),
    CredentialsFile(String),
    Missing,
}

impl KeySource {
    fn detect(env_value: Option<String>, store: &CredentialStore) -> Self {
        match env_value.filter(|v| !v.trim().is_empty()) {
            Some(key) => KeySource::Environment(key),
            None => match store.get_api_key() {
                Some(key) if !key.trim().is_empty() => KeySource::CredentialsFile(key.clone()),
                _ => KeySource::Missing,
            },
        }
    }

    fn origin(&self) -> &'static str {
        match self {
            KeySource::Environment(_) => "environment",
            KeySource::CredentialsFile(_) => "credentials file",
            KeySource::Missing => "missing",
        }
    }

    fn display(&self, full: bool) -> String {
        match self {
            KeySource::Environment(key) | KeySource::CredentialsFile(key) => {
                if full {
                    key.clone()
                } else {
                    mask_string(key)
                }
            }
            KeySource::Missing => "<not set>".to_string(),
        }
    }
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

fn section_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = resolve_paths()?;
    let config_file = path_manager.config_file();
    let file_exists = config_file.exists();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let store = load_credentials(&path_manager)?;
    let key = KeySource::detect(std::env::var(API_KEY_ENV).ok(), &store);

    match output.format() {
        OutputFormat::Human => {
            output.heading("Configuration");
            if !file_exists {
                output.warn(format!(
                    "No configuration file at {}; showing defaults. Run 'watchbox config init' to write one.",
                    config_file.display()
                ));
            }

            output.table(&section_table(
                "Paths",
                vec![
                    ("Config file", config_file.display().to_string()),
                    ("Credentials file", path_manager.credentials_file().display().to_string()),
                    ("Log directory", path_manager.log_dir().display().to_string()),
                ],
            ));

            output.table(&section_table(
                "Catalog",
                vec![
                    ("Base URL", config.catalog.base_url.clone()),
                    (
                        "Request timeout",
                        config
                            .catalog
                            .request_timeout_secs
                            .map(|secs| format!("{}s", secs))
                            .unwrap_or_else(|| "client default".to_string()),
                    ),
                    ("API key", key.display(full)),
                    ("API key source", key.origin().to_string()),
                ],
            ));

            output.table(&section_table(
                "Search",
                vec![
                    ("Earliest year", config.search.year_min.to_string()),
                    ("Latest year", config.search.year_max.to_string()),
                    ("Default type", config.search.default_kind.to_string()),
                    ("Load-more threshold", config.search.load_more_threshold.to_string()),
                ],
            ));

            if let Err(e) = config.validate() {
                output.error(format!("Configuration is invalid: {}", e));
            } else if key == KeySource::Missing {
                output.warn(format!("Set {} or run 'watchbox config api-key' before searching.", API_KEY_ENV));
            } else {
                output.info(format!("{}", "Configuration looks good.".green()));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "config_file_exists": file_exists,
                "credentials_file": path_manager.credentials_file().display().to_string(),
                "log_dir": path_manager.log_dir().display().to_string(),
                "catalog": {
                    "base_url": config.catalog.base_url,
                    "request_timeout_secs": config.catalog.request_timeout_secs,
                    "api_key": key.display(full),
                    "api_key_source": key.origin(),
                },
                "search": {
                    "year_min": config.search.year_min,
                    "year_max": config.search.year_max,
                    "default_kind": config.search.default_kind.label(),
                    "load_more_threshold": config.search.load_more_threshold,
                },
                "valid": config.validate().is_ok(),
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = resolve_paths()?;
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    tracing::info!(path = %config_file.display(), "Wrote default configuration");
    output.success(format!("Default configuration written to {}", config_file.display()));
    Ok(())
}

fn configure_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => {
            output.info("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key must not be empty"));
    }

    let path_manager = resolve_paths()?;
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;

    let mut store = load_credentials(&path_manager)?;
    store.set_api_key(key);
    store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("API key stored in {}", path_manager.credentials_file().display()));
    if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        output.warn(format!("{} is set and takes precedence over the stored key.", API_KEY_ENV));
    }
    Ok(())
}
