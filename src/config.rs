/// Runtime configuration for aura
///
/// Built once at process start from the environment and handed down by
/// reference. Nothing reads the environment after this point.

use crate::db::Database;
use crate::error::{AuraError, Result};
use crate::store::{BookmarkStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const AI_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "nano";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Where bookmarks and history live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite database file
    File(PathBuf),
    /// Process-local map, discarded on exit
    Memory,
}

/// Chat API settings used by `aura ask`
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub storage: StorageBackend,
    /// Cap on retained navigation history rows; `None` keeps everything
    pub history_limit: Option<usize>,
    /// Explicit `AURA_LOG_LEVEL`, if any
    pub log_level: Option<String>,
    pub ai: AiSettings,
    /// Editor command for commit messages: `$VISUAL`, then `$EDITOR`
    pub editor: String,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("AURA_ENV").as_deref() {
            None | Some("production") => Environment::Production,
            Some("development") => Environment::Development,
            Some(other) => {
                return Err(AuraError::Config(format!("unknown AURA_ENV '{}'", other)))
            }
        };

        let storage = match get("AURA_DB_MODE").as_deref() {
            None | Some("file") => {
                let path = match get("AURA_DB_PATH") {
                    Some(path) => PathBuf::from(path),
                    None => Self::default_data_dir()?.join("aura.db"),
                };
                StorageBackend::File(path)
            }
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(AuraError::Config(format!(
                    "unknown AURA_DB_MODE '{}', expected 'file' or 'memory'",
                    other
                )))
            }
        };

        let history_limit = match get("AURA_HISTORY_LIMIT") {
            None => None,
            Some(raw) => {
                let limit: usize = raw.trim().parse().map_err(|_| {
                    AuraError::Config(format!("AURA_HISTORY_LIMIT must be a number, got '{}'", raw))
                })?;
                (limit > 0).then_some(limit)
            }
        };

        let ai = AiSettings {
            api_key: get("AURA_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            base_url: get("AURA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: get("AURA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: AI_TIMEOUT,
        };

        Ok(Self {
            environment,
            storage,
            history_limit,
            log_level: get("AURA_LOG_LEVEL"),
            ai,
            editor: get("VISUAL")
                .or_else(|| get("EDITOR"))
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
        })
    }

    /// `<user config dir>/aura`
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("aura"))
            .ok_or_else(|| AuraError::Config("Could not determine config directory".to_string()))
    }

    /// Default tracing filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> String {
        match (&self.log_level, self.environment) {
            (Some(level), _) => level.clone(),
            (None, Environment::Development) => "debug".to_string(),
            (None, Environment::Production) => "warn".to_string(),
        }
    }

    /// Open the configured backend. The only place that looks at the mode.
    pub async fn open_store(&self) -> Result<Arc<dyn BookmarkStore>> {
        match &self.storage {
            StorageBackend::File(path) => Ok(Arc::new(Database::new(path).await?)),
            StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("AURA_DB_PATH", "/tmp/aura.db")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from("/tmp/aura.db")));
        assert_eq!(config.history_limit, None);
        assert_eq!(config.ai.base_url, DEFAULT_API_URL);
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_development_logs_debug() {
        let config = config_from(&[("AURA_ENV", "development"), ("AURA_DB_MODE", "memory")]).unwrap();
        assert_eq!(config.log_filter(), "debug");

        let config = config_from(&[
            ("AURA_ENV", "development"),
            ("AURA_DB_MODE", "memory"),
            ("AURA_LOG_LEVEL", "info"),
        ])
        .unwrap();
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_api_key_fallback() {
        let config = config_from(&[("AURA_DB_MODE", "memory"), ("OPENAI_API_KEY", "sk-openai")]).unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-openai"));

        let config = config_from(&[
            ("AURA_DB_MODE", "memory"),
            ("AURA_API_KEY", "sk-aura"),
            ("OPENAI_API_KEY", "sk-openai"),
        ])
        .unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-aura"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("AURA_DB_MODE", "memory"), ("AURA_API_KEY", "")]).unwrap();
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_history_limit() {
        let config = config_from(&[("AURA_DB_MODE", "memory"), ("AURA_HISTORY_LIMIT", "500")]).unwrap();
        assert_eq!(config.history_limit, Some(500));

        let config = config_from(&[("AURA_DB_MODE", "memory"), ("AURA_HISTORY_LIMIT", "0")]).unwrap();
        assert_eq!(config.history_limit, None);

        let result = config_from(&[("AURA_DB_MODE", "memory"), ("AURA_HISTORY_LIMIT", "lots")]);
        assert!(matches!(result, Err(AuraError::Config(_))));
    }

    #[test]
    fn test_editor_precedence() {
        let config = config_from(&[("AURA_DB_MODE", "memory")]).unwrap();
        assert_eq!(config.editor, DEFAULT_EDITOR);

        let config = config_from(&[("AURA_DB_MODE", "memory"), ("EDITOR", "vim")]).unwrap();
        assert_eq!(config.editor, "vim");

        let config = config_from(&[
            ("AURA_DB_MODE", "memory"),
            ("EDITOR", "vim"),
            ("VISUAL", "code --wait"),
        ])
        .unwrap();
        assert_eq!(config.editor, "code --wait");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = config_from(&[("AURA_DB_MODE", "docker")]);
        assert!(matches!(result, Err(AuraError::Config(_))));
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = config_from(&[("AURA_DB_MODE", "memory")]).unwrap();
        let store = config.open_store().await.unwrap();
        store.insert_bookmark("x", "/x").await.unwrap();
        assert!(store.get_bookmark("x").await.unwrap().is_some());
        store.close().await;
    }
}
