//! Exporter configuration (`model-export.toml`)
//!
//! ```toml
//! asset_root = "Assets"
//! extensions = ["gltf", "glb"]
//! output_extension = "shmodel"
//! ```
//!
//! Every field is optional. CLI flags override the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ExportError, ExportResult};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "model-export.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory scanned when no input paths are given
    pub asset_root: PathBuf,
    /// Source extensions matched during the scan (case-insensitive, no dot)
    pub extensions: Vec<String>,
    /// Extension of compiled files (no dot)
    pub output_extension: String,
    /// Write outputs here instead of next to their sources
    #[serde(skip)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("Assets"),
            extensions: vec!["gltf".to_string(), "glb".to_string()],
            output_extension: model_common::MODEL_EXT.to_string(),
            output_dir: None,
        }
    }
}

impl ExportConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str, path: &Path) -> ExportResult<Self> {
        toml::from_str(text).map_err(|source| ExportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file
    pub fn load(path: &Path) -> ExportResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, else `model-export.toml` if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> ExportResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// True if `path` has one of the configured source extensions
    pub fn matches_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }
}
