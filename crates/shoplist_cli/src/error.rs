//! CLI error type.

use shoplist_core::{ConfigError, ServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure surfaced to the user with a non-zero exit status.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
    /// `--pick`/session argument not in `STORE/CATEGORY/ITEM` form.
    InvalidPick(String),
    /// Session argument not in `STORE/CATEGORY` form.
    InvalidCategoryPath(String),
    /// Malformed session action; holds the expected form.
    Usage(&'static str),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidPick(raw) => {
                write!(f, "invalid pick `{raw}`; expected STORE/CATEGORY/ITEM")
            }
            Self::InvalidCategoryPath(raw) => {
                write!(f, "invalid category `{raw}`; expected STORE/CATEGORY")
            }
            Self::Usage(expected) => write!(f, "usage: {expected}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidPick(_) | Self::InvalidCategoryPath(_) | Self::Usage(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
