//! Error type shared by every service config.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Coarse failure category of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The TOML text was malformed or did not match the schema.
    Decode,
    /// The in-memory value could not be represented as TOML.
    Encode,
    /// Missing, unreadable or unwritable file, or an unresolvable directory.
    FileIo,
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// All errors that can arise while loading, encoding or saving a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parse failure or type mismatch against the schema.
    #[error("failed to decode {service} config: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: toml::de::Error,
    },

    /// Serialisation failure (e.g. an integer outside the TOML range).
    #[error("failed to encode {service} config: {source}")]
    Encode {
        service: &'static str,
        #[source]
        source: toml::ser::Error,
    },

    /// The config file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Any other filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform did not report a user document directory.
    #[error("platform document directory is unavailable")]
    DocumentDirUnavailable,
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::NotFound { .. } | Self::Io { .. } | Self::DocumentDirUnavailable => {
                ErrorKind::FileIo
            }
        }
    }
}
