//! Shared logging setup for the editor binaries.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "grledit=info,grledit_protocol=info";
const MAX_LOG_FILES: usize = 5;
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Logging configuration.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// The TUI owns the terminal; stderr output is cut down to warnings.
    pub tui_mode: bool,
    /// Overrides `<home>/logs`.
    pub log_dir: Option<PathBuf>,
}

/// Install a tracing subscriber with a size-rotated log file and stderr output.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = match config.log_dir {
        Some(dir) => dir,
        None => logs_dir(),
    };
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create logs directory: {}", log_dir.display()))?;
    let file_writer = SharedLogWriter::open(&log_dir, config.app_name)
        .context("Failed to initialize rotating log writer")?;

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let console_filter = if config.tui_mode && !config.verbose {
        EnvFilter::new("warn")
    } else if config.verbose {
        EnvFilter::new("grledit=debug,grledit_protocol=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(())
}

/// Logs directory: ~/.grledit/logs
pub fn logs_dir() -> PathBuf {
    grledit_protocol::paths::default_logs_dir()
}

/// Log file that rolls over to `<name>.log.1 .. <name>.log.<keep-1>` once it
/// exceeds `limit` bytes. With `keep == 1` the active file is truncated instead.
struct RotatingLog {
    dir: PathBuf,
    stem: String,
    keep: usize,
    limit: u64,
    file: Option<File>,
    written: u64,
}

impl RotatingLog {
    fn open(dir: &Path, name: &str, keep: usize, limit: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut log = Self {
            dir: dir.to_path_buf(),
            stem: file_stem(name),
            keep: keep.max(1),
            limit,
            file: None,
            written: 0,
        };
        log.reopen()?;
        if log.written > log.limit {
            log.roll()?;
        }
        Ok(log)
    }

    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stem))
    }

    fn archive_path(&self, generation: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.stem, generation))
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }

        let oldest = self.keep - 1;
        if oldest > 0 {
            let expired = self.archive_path(oldest);
            if expired.exists() {
                fs::remove_file(&expired)?;
            }
            for generation in (1..oldest).rev() {
                let from = self.archive_path(generation);
                if from.exists() {
                    fs::rename(&from, self.archive_path(generation + 1))?;
                }
            }
            let active = self.active_path();
            if active.exists() {
                fs::rename(active, self.archive_path(1))?;
            }
        } else {
            // No archives kept: start the active file over
            let active = self.active_path();
            if active.exists() {
                fs::remove_file(active)?;
            }
        }

        self.reopen()
    }
}

impl Write for RotatingLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written + buf.len() as u64 > self.limit {
            self.roll()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
struct SharedLogWriter {
    inner: Arc<Mutex<RotatingLog>>,
}

impl SharedLogWriter {
    fn open(dir: &Path, name: &str) -> Result<Self> {
        let log = RotatingLog::open(dir, name, MAX_LOG_FILES, MAX_LOG_FILE_SIZE)
            .with_context(|| format!("Failed to open log file for {}", name))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(log)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogWriter {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?
            .flush()
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem("grl edit/tui"), "grl_edit_tui");
        assert_eq!(file_stem("grledit-cli_2"), "grledit-cli_2");
    }

    #[test]
    fn test_rolls_when_limit_exceeded() {
        let dir = TempDir::new().unwrap();
        let mut log = RotatingLog::open(dir.path(), "grledit", 3, 16).unwrap();

        log.write_all(b"0123456789").unwrap();
        log.write_all(b"abcdefghij").unwrap();
        log.flush().unwrap();

        let active = fs::read_to_string(dir.path().join("grledit.log")).unwrap();
        let first = fs::read_to_string(dir.path().join("grledit.log.1")).unwrap();
        assert_eq!(active, "abcdefghij");
        assert_eq!(first, "0123456789");
    }

    #[test]
    fn test_keeps_bounded_generations() {
        let dir = TempDir::new().unwrap();
        let mut log = RotatingLog::open(dir.path(), "grledit", 2, 4).unwrap();

        for chunk in [b"aaaa", b"bbbb", b"cccc"] {
            log.write_all(chunk).unwrap();
        }
        log.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("grledit.log")).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(dir.path().join("grledit.log.1")).unwrap(), "bbbb");
        assert!(!dir.path().join("grledit.log.2").exists());
    }

    #[test]
    fn test_single_generation_truncates_active_file() {
        let dir = TempDir::new().unwrap();
        let mut log = RotatingLog::open(dir.path(), "grledit", 1, 4).unwrap();

        for chunk in [b"aaaa", b"bbbb", b"cccc"] {
            log.write_all(chunk).unwrap();
        }
        log.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("grledit.log")).unwrap(), "cccc");
        assert_eq!(log.written, 4);
        assert!(!dir.path().join("grledit.log.1").exists());
    }

    #[test]
    fn test_existing_oversized_file_rolls_on_open() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("grledit.log"), "x".repeat(32)).unwrap();

        let log = RotatingLog::open(dir.path(), "grledit", 3, 16).unwrap();
        assert_eq!(log.written, 0);
        assert!(dir.path().join("grledit.log.1").exists());
    }
}
