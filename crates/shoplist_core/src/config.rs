//! Data and log location resolution.
//!
//! # Responsibility
//! - Decide where the catalog/order documents and rolling logs live.
//!
//! # Invariants
//! - Precedence is explicit override, then environment variable, then
//!   default.
//! - Resolved paths are absolute.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SHOPLIST_DATA_DIR";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "SHOPLIST_LOG_DIR";
/// Catalog document file name.
pub const CATALOG_FILE_NAME: &str = "shopping_data.json";
/// Visit order document file name.
pub const ORDER_FILE_NAME: &str = "shopping_meta.json";
const LOG_SUBDIR: &str = "logs";

/// Configuration resolution failure.
#[derive(Debug)]
pub enum ConfigError {
    /// The working directory is needed to anchor a relative path.
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
        }
    }
}

/// Resolved file locations for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub catalog_file: PathBuf,
    pub order_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Resolves paths from overrides, process environment and working
    /// directory.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(Self::resolve_with(data_dir, log_dir, &cwd, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Resolves paths against an explicit working directory and environment
    /// lookup.
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        cwd: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(|| env_path(&env, DATA_DIR_ENV))
            .map(|path| absolutize(cwd, path))
            .unwrap_or_else(|| cwd.to_path_buf());
        let log_dir = log_dir
            .or_else(|| env_path(&env, LOG_DIR_ENV))
            .map(|path| absolutize(cwd, path))
            .unwrap_or_else(|| data_dir.join(LOG_SUBDIR));

        Self {
            catalog_file: data_dir.join(CATALOG_FILE_NAME),
            order_file: data_dir.join(ORDER_FILE_NAME),
            data_dir,
            log_dir,
        }
    }
}

fn env_path(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    env(key)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
