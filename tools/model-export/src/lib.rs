//! model-export library
//!
//! Compiles glTF scenes into `.shmodel` engine assets. The CLI in `main.rs`
//! is a thin batch driver over [`compile_file`].
//!
//! Pipeline: [`source`] flattens the document, [`accessor`] reads typed
//! attribute data, [`mesh`], [`skeleton`] and [`animation`] build the asset
//! parts, [`model`] assembles them and [`formats`] writes the file.

pub mod accessor;
pub mod animation;
pub mod config;
pub mod error;
pub mod formats;
pub mod mesh;
pub mod model;
pub mod skeleton;
pub mod source;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use model::{assemble_model, compile, compile_file, discover_sources, output_path_for};
