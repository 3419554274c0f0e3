//! Error taxonomy of the export pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Failure while compiling one source file.
///
/// `ParseFailure` and `Io` abort the current file. `AttributeMissing` and
/// `AccessorOutOfRange` abort the containing mesh or channel only, and
/// `MalformedRig` drops the rig while the rest of the asset is still written.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to parse {path:?}: {source}")]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("Attribute {attribute} missing")]
    AttributeMissing { attribute: String },

    #[error("{what} {index} out of range ({len} available)")]
    AccessorOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Malformed rig: {0}")]
    MalformedRig(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ExportError {
    pub(crate) fn missing(attribute: impl Into<String>) -> Self {
        Self::AttributeMissing {
            attribute: attribute.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::AccessorOutOfRange { what, index, len }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
