//! Helpful error types for CLI commands
//!
//! Every error says what went wrong, adds context when there is any, and
//! ends with `TRY:` suggestions.

use std::fmt;
use std::path::Path;

use grledit::config::ENDPOINT_ENV;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!(
                    "TRY: Look for similar files: ls {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
    }

    /// File exists but cannot be read as UTF-8 text
    pub fn cannot_read_file(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check file permissions: ls -la {}", path.display()),
                "TRY: Rule and context files must be UTF-8 text".to_string(),
            ])
    }

    pub fn invalid_endpoint(endpoint: &str, reason: &str) -> Self {
        Self::new(format!("Invalid evaluation endpoint: '{}'", endpoint))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Use a full URL such as http://127.0.0.1:32123".to_string(),
                format!("TRY: Check --endpoint, {} and config.toml", ENDPOINT_ENV),
                "TRY: Inspect the effective settings: grledit config".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While submitting")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While submitting"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_file_not_found() {
        let err = HelpfulError::file_not_found(&PathBuf::from("/nonexistent/rules.grl"));
        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/rules.grl"));
        assert!(display.contains("ls /nonexistent"));
    }

    #[test]
    fn test_invalid_endpoint_mentions_overrides() {
        let display = HelpfulError::invalid_endpoint("nope", "relative URL without a base").to_string();
        assert!(display.contains("'nope'"));
        assert!(display.contains("GRLEDIT_ENDPOINT"));
        assert!(display.contains("relative URL"));
    }
}
