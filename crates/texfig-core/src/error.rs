// File: crates/texfig-core/src/error.rs
// Summary: Error taxonomy for style configuration, figure sizing and figure export.

use std::path::PathBuf;

use thiserror::Error;

/// Why an export could not produce its output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported output format `{0}`")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Render(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    /// The figure could not be written to `path`.
    #[error("failed to export figure to `{}`", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
    #[error("invalid figure size: {0}")]
    InvalidFigSize(String),
    #[error("unknown backend `{0}`")]
    UnknownBackend(String),
    #[error("invalid rc value for `{key}`: {reason}")]
    InvalidRc { key: String, reason: String },
    #[error("failed to read style file `{}`", path.display())]
    StyleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    StyleParse(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn export(path: impl Into<PathBuf>, source: impl Into<ExportError>) -> Self {
        Error::Export { path: path.into(), source: source.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
