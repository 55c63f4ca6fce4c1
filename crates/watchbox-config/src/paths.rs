use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the platform config directory when set
pub const BASE_PATH_ENV: &str = "WATCHBOX_BASE_PATH";

/// Pick the base directory: a non-empty override wins, then `{platform}/watchbox`
fn resolve_base(override_path: Option<PathBuf>, platform_config_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(base) = override_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(base);
    }
    platform_config_dir
        .map(|dir| dir.join("watchbox"))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory; set {} to choose one", BASE_PATH_ENV))
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    /// `WATCHBOX_BASE_PATH` when set, otherwise the platform config dir (~/.config/watchbox on Linux)
    pub fn new() -> Result<Self> {
        let base = resolve_base(std::env::var_os(BASE_PATH_ENV).map(PathBuf::from), dirs::config_dir())?;
        Ok(Self::with_base(base))
    }

    /// Lay out all files under `base` (config at the top level, logs in a subdir)
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("watchbox.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
