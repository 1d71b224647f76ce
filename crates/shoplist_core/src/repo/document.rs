//! Whole-document JSON file access shared by both repositories.

use super::{RepoError, RepoResult};
use log::{error, info};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Why a document could not be used as-is.
#[derive(Debug)]
pub(crate) enum ReadFailure {
    Missing,
    Unreadable(std::io::Error),
}

impl ReadFailure {
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unreadable(_) => "unreadable",
        }
    }

    pub(crate) fn detail(&self) -> String {
        match self {
            Self::Missing => "not found".to_string(),
            Self::Unreadable(err) => err.to_string(),
        }
    }
}

/// Reads a whole document as UTF-8 text.
pub(crate) fn read_document(path: &Path) -> Result<String, ReadFailure> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ReadFailure::Missing,
        _ => ReadFailure::Unreadable(err),
    })
}

/// Writes `value` as pretty JSON, replacing `path` only after the temporary
/// sibling file is fully written.
pub(crate) fn write_document<T: Serialize>(
    path: &Path,
    value: &T,
    document: &'static str,
) -> RepoResult<()> {
    let started_at = Instant::now();
    let result = write_atomically(path, value);
    match &result {
        Ok(()) => info!(
            "event=document_save module=repo status=ok document={} duration_ms={}",
            document,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=document_save module=repo status=error document={} duration_ms={} error={}",
            document,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn write_atomically<T: Serialize>(path: &Path, value: &T) -> RepoResult<()> {
    let mut encoded = serde_json::to_string_pretty(value).map_err(|source| RepoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    encoded.push('\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RepoError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staging = staging_path(path);
    fs::write(&staging, encoded).map_err(|source| RepoError::Io {
        path: staging.clone(),
        source,
    })?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        RepoError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(".tmp");
    path.with_file_name(name)
}
