// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Errors raised while loading or saving data files
//!
//! The derivation functions themselves are infallible; only the catalog,
//! store, definition and configuration loaders and the exporters return these.

use std::path::PathBuf;

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error on {}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced
    #[error("invalid JSON in {}", path.display())]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A TOML document could not be parsed
    #[error("invalid TOML in {}", path.display())]
    Toml {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// The file extension does not name a supported format
    #[error("unsupported file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// A CSV export could not be written
    #[error("CSV export failed")]
    Csv(#[from] csv::Error),

    /// A JSON export could not be rendered
    #[error("JSON export failed")]
    Serialize(#[from] serde_json::Error),

    /// Configuration could not be assembled
    #[error("configuration error")]
    Config(#[from] config::ConfigError),
}

/// Result alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is a missing file
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
