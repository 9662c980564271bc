//! Editor configuration.
//!
//! Read from `~/.grledit/config.toml` (or `$GRLEDIT_HOME/config.toml`). A
//! missing file means defaults. Endpoint precedence is command-line flag,
//! then `GRLEDIT_ENDPOINT`, then the file, then [`DEFAULT_ENDPOINT`].

use std::path::{Path, PathBuf};

use grledit_protocol::paths::default_config_path;
use grledit_protocol::{RequestShape, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::BlockPlacement;

pub const ENDPOINT_ENV: &str = "GRLEDIT_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}. Delete this file to reset.", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Base URL of the evaluation service
    pub endpoint: String,
    pub block_placement: BlockPlacement,
    pub request_shape: RequestShape,
    /// No timeout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            block_placement: BlockPlacement::default(),
            request_shape: RequestShape::default(),
            request_timeout_secs: None,
        }
    }
}

impl EditorConfig {
    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&default_config_path())
    }

    /// Endpoint after applying the flag and environment overrides.
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        self.resolve_endpoint_with(flag, std::env::var(ENDPOINT_ENV).ok().as_deref())
    }

    fn resolve_endpoint_with(&self, flag: Option<&str>, env: Option<&str>) -> String {
        flag.or(env)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.endpoint, "http://127.0.0.1:32123");
        assert_eq!(config.block_placement, BlockPlacement::Append);
        assert_eq!(config.request_shape, RequestShape::Array);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "block_placement = \"after-anchor\"\nrequest_timeout_secs = 15\n",
        )
        .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.block_placement, BlockPlacement::AfterAnchor);
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_shape = \"sideways\"\n").unwrap();

        let err = EditorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_endpoint_precedence() {
        let config = EditorConfig {
            endpoint: "http://file:1".to_string(),
            ..EditorConfig::default()
        };
        assert_eq!(
            config.resolve_endpoint_with(Some("http://flag:1"), Some("http://env:1")),
            "http://flag:1"
        );
        assert_eq!(
            config.resolve_endpoint_with(None, Some("http://env:1")),
            "http://env:1"
        );
        assert_eq!(config.resolve_endpoint_with(None, Some("  ")), "http://file:1");
        assert_eq!(config.resolve_endpoint_with(None, None), "http://file:1");
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = EditorConfig {
            request_shape: RequestShape::Legacy,
            ..EditorConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("request_shape = \"legacy\""));
        assert_eq!(toml::from_str::<EditorConfig>(&text).unwrap(), config);
    }
}
