use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// A record carries both a join URL and a meeting id.
    #[error("entry '{label}' has both a url and an id")]
    InvalidEntry { label: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot place a separator directly after another separator")]
    AdjacentSeparator,
    #[error("meetings file {path} is corrupt: {reason}")]
    ConfigCorrupt { path: PathBuf, reason: String },
    #[error("failed to save meetings to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("'{0}' is not a joinable meeting")]
    NotLaunchable(String),
    #[error("joining '{0}' needs a password, which cannot be entered automatically")]
    PasswordJoinUnsupported(String),
    #[error("failed to open {link}: {source}")]
    Sink {
        link: String,
        #[source]
        source: std::io::Error,
    },
}
