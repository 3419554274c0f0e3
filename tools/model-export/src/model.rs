//! Model assembly and the per-file pipeline
//!
//! `load -> build -> write`, one source file at a time. Nothing about one
//! file outlives its call to [`compile_file`].

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use model_common::ModelAsset;
use walkdir::WalkDir;

use crate::animation::build_animations;
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::formats::write_model;
use crate::mesh::build_meshes;
use crate::skeleton::build_skeleton;
use crate::source::{load_scene, SourceScene};

/// Run every builder over a scene and assemble the result.
///
/// The rig is built first so animations can use its joint map.
pub fn assemble_model(scene: &SourceScene) -> ModelAsset {
    let skeleton = build_skeleton(scene);
    let meshes = build_meshes(scene);
    let animations = build_animations(scene, skeleton.joint_map.as_ref());
    ModelAsset::assemble(meshes, animations, skeleton.rig)
}

/// Output path for `input`: same stem, model extension, optionally in another directory
pub fn output_path_for(input: &Path, config: &ExportConfig) -> PathBuf {
    let output = input.with_extension(&config.output_extension);
    match (&config.output_dir, output.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => output,
    }
}

/// Write `asset` to `output`.
///
/// Bytes go to `<output>.tmp` first, which is renamed over `output` once
/// complete, so a failed run never leaves a truncated model behind.
pub fn compile(asset: &ModelAsset, output: &Path) -> ExportResult<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }

    let mut tmp_name = output.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let result = write_to(asset, &tmp).and_then(|()| {
        fs::rename(&tmp, output).map_err(|e| ExportError::io(output, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map(|()| output.to_path_buf())
}

fn write_to(asset: &ModelAsset, path: &Path) -> ExportResult<()> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_model(&mut writer, asset).map_err(|e| ExportError::io(path, e))?;
    writer.flush().map_err(|e| ExportError::io(path, e))
}

/// Compile one source file, returning the written path.
pub fn compile_file(input: &Path, config: &ExportConfig) -> ExportResult<PathBuf> {
    let scene = load_scene(input)?;
    let asset = assemble_model(&scene);
    let output = output_path_for(input, config);
    compile(&asset, &output)?;

    tracing::info!(
        "Compiled {:?} -> {:?}: {} meshes, {} animations, {}",
        input,
        output,
        asset.header().mesh_count,
        asset.header().anim_count,
        match asset.rig() {
            Some(rig) => format!("rig with {} joints", rig.node_count()),
            None => "no rig".to_string(),
        }
    );

    Ok(output)
}

/// All source files under `root`, sorted.
pub fn discover_sources(root: &Path, config: &ExportConfig) -> ExportResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ExportError::io(
            root,
            io::Error::new(ErrorKind::NotFound, "asset root is not a directory"),
        ));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && config.matches_source(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    sources.sort();
    Ok(sources)
}
