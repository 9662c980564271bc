//! Command-line interface for the GRL editor.

pub mod config;
pub mod error;
pub mod submit;
pub mod tui;

use std::path::{Path, PathBuf};

use grledit::{EditorConfig, HttpTransport};

use error::HelpfulError;

/// Read a rule or context file named on the command line.
pub fn read_input(path: &Path) -> Result<String, HelpfulError> {
    if !path.exists() {
        return Err(HelpfulError::file_not_found(path));
    }
    std::fs::read_to_string(path).map_err(|e| HelpfulError::cannot_read_file(path, &e.to_string()))
}

/// Read every context file, keeping command-line order.
pub fn read_contexts(paths: &[PathBuf]) -> Result<Vec<String>, HelpfulError> {
    paths.iter().map(|p| read_input(p)).collect()
}

/// Loaded config plus the endpoint after overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: EditorConfig,
    pub endpoint: String,
}

impl Settings {
    pub fn load(endpoint_flag: Option<&str>) -> anyhow::Result<Self> {
        let config = EditorConfig::load_default()?;
        let endpoint = config.resolve_endpoint(endpoint_flag);
        Ok(Self { config, endpoint })
    }

    pub fn transport(&self) -> Result<HttpTransport, HelpfulError> {
        HttpTransport::new(&self.endpoint, self.config.request_timeout_secs)
            .map_err(|e| HelpfulError::invalid_endpoint(&self.endpoint, &e.to_string()))
    }
}
