//! Locations of the editor's files.
//!
//! Everything lives under one home directory:
//! `$GRLEDIT_HOME`, else `$HOME/.grledit` (`%USERPROFILE%` on Windows), else
//! `./.grledit`.

use std::path::{Path, PathBuf};
use std::sync::Once;

pub const HOME_ENV: &str = "GRLEDIT_HOME";
const HOME_DIR_NAME: &str = ".grledit";

static HOME_CREATE_WARNING: Once = Once::new();

/// Home directory given an environment lookup.
pub fn resolve_home(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(explicit) = lookup(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(explicit);
    }
    let user_home = lookup("HOME").or_else(|| lookup("USERPROFILE"));
    match user_home {
        Some(home) if !home.is_empty() => Path::new(&home).join(HOME_DIR_NAME),
        _ => Path::new(".").join(HOME_DIR_NAME),
    }
}

pub fn grledit_home() -> PathBuf {
    resolve_home(|key| std::env::var(key).ok())
}

pub fn default_config_path() -> PathBuf {
    grledit_home().join("config.toml")
}

/// `<home>/logs`. Creates the home directory, warning once on failure.
pub fn default_logs_dir() -> PathBuf {
    let home = grledit_home();
    if let Err(err) = std::fs::create_dir_all(&home) {
        HOME_CREATE_WARNING.call_once(|| {
            eprintln!(
                "Warning: cannot create {} ({}). Point {} at a writable directory.",
                home.display(),
                err,
                HOME_ENV
            );
        });
    }
    home.join("logs")
}
