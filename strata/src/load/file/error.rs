//! Failures reading or parsing a configuration file.

use std::str::Utf8Error;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Why a file source could not be turned into pairs.
#[derive(Debug, Error)]
pub(super) enum FileError {
    #[error("failed to read file: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not valid UTF-8: {source}")]
    Utf8 {
        name: String,
        #[source]
        source: Utf8Error,
    },

    #[error("malformed document: {source}")]
    Parse {
        name: String,
        #[source]
        source: Box<figment::Error>,
    },
}

impl FileError {
    /// Path or name of the source the error belongs to.
    pub(super) fn source_name(&self) -> String {
        match self {
            Self::Io { path, .. } => path.to_string(),
            Self::Utf8 { name, .. } | Self::Parse { name, .. } => name.clone(),
        }
    }
}
