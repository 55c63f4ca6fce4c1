use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable holding the catalog API key
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

const API_KEY_ENTRY: &str = "omdb_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_api_key(&self) -> Option<&String> {
        self.get(API_KEY_ENTRY).filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY_ENTRY.to_string(), key);
    }
}

/// Pick the catalog API key: a non-empty environment value wins over the stored one.
///
/// Absence is not an error here; requests without a key are rejected by the catalog.
pub fn resolve_api_key(env_value: Option<String>, store: &CredentialStore) -> Option<String> {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| store.get_api_key().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_api_key("abc123".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_api_key(), Some(&"abc123".to_string()));
    }

    #[test]
    fn test_credential_store_remove() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());

        assert_eq!(store.get("key1"), Some(&"value1".to_string()));
        store.remove("key1");
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(&"value2".to_string()));
    }

    #[test]
    fn test_resolve_api_key_prefers_environment() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_api_key("stored".to_string());

        assert_eq!(resolve_api_key(Some("from-env".to_string()), &store), Some("from-env".to_string()));
        assert_eq!(resolve_api_key(Some("  ".to_string()), &store), Some("stored".to_string()));
        assert_eq!(resolve_api_key(None, &store), Some("stored".to_string()));
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let store = CredentialStore::new(PathBuf::from("/tmp/test"));
        assert_eq!(resolve_api_key(None, &store), None);
    }
}
