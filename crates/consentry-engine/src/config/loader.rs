//! YAML configuration and lexicon overrides.

use super::schema::ConsentryConfig;
use crate::lexicon::Lexicon;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Names an explicit configuration file; it must exist when set.
pub const CONFIG_ENV_VAR: &str = "CONSENTRY_CONFIG";

const LOCAL_CONFIG: &str = "consentry.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// File the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the first configuration found:
    /// 1. `$CONSENTRY_CONFIG`
    /// 2. ./consentry.yaml
    /// 3. ~/.consentry/config.yaml
    ///
    /// Defaults apply when none of them exists.
    pub async fn load_default() -> Result<ConsentryConfig, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load_from(Path::new(&path)).await;
        }
        for path in Self::search_paths(dirs::home_dir()) {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Self::load_from(&path).await;
            }
        }
        debug!("no configuration file found, using defaults");
        Ok(ConsentryConfig::default())
    }

    /// Implicit search locations in priority order.
    pub fn search_paths(home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".").join(LOCAL_CONFIG)];
        paths.extend(home.map(|home| home.join(".consentry").join("config.yaml")));
        paths
    }

    /// A blank file is the default configuration.
    pub async fn load_from(path: &Path) -> Result<ConsentryConfig, ConfigError> {
        let config = read_yaml(path).await?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load a lexicon override. Fields absent from the file keep their
    /// built-in values; JSON is accepted as a YAML subset.
    pub async fn load_lexicon(path: &Path) -> Result<Lexicon, ConfigError> {
        let lexicon: Lexicon = read_yaml(path).await?;
        info!(path = %path.display(), languages = lexicon.languages.len(), "lexicon override loaded");
        Ok(lexicon)
    }
}

async fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
