//! Animation extraction (source clips -> [`AnimationTrack`])
//!
//! Keyframes are grouped per target joint: `channels[j]` holds the position,
//! rotation and scale keys of compact joint `j`. Keys keep their source
//! timestamps; no resampling is done.

use model_common::asset::Keyframe;
use model_common::{AnimationTrack, Interpolation, JointChannel};

use crate::accessor::fetch;
use crate::error::{ExportError, ExportResult};
use crate::skeleton::JointMap;
use crate::source::{SourceAnimation, SourceChannel, SourceScene};

/// Keyframe times are in seconds
pub const TICKS_PER_SECOND: f64 = 1.0;

/// Build every clip of the scene.
///
/// With a joint map, targets are remapped to compact joint indices and
/// channels on non-joint nodes are skipped. Without one, raw node ids are
/// used as channel indices.
pub fn build_animations(scene: &SourceScene, joint_map: Option<&JointMap>) -> Vec<AnimationTrack> {
    scene
        .animations
        .iter()
        .enumerate()
        .map(|(index, anim)| build_animation(scene, index, anim, joint_map))
        .collect()
}

/// Build one clip. Channels that fail are dropped individually.
pub fn build_animation(
    scene: &SourceScene,
    index: usize,
    anim: &SourceAnimation,
    joint_map: Option<&JointMap>,
) -> AnimationTrack {
    let name = anim
        .name
        .clone()
        .unwrap_or_else(|| format!("animation_{}", index));

    let mut channels: Vec<JointChannel> = Vec::new();
    for (channel_index, channel) in anim.channels.iter().enumerate() {
        let Some(joint) = resolve_target(channel, joint_map) else {
            tracing::debug!(
                "Animation '{}': channel {} targets node {} which is not a joint, skipped",
                name,
                channel_index,
                channel.target_node
            );
            continue;
        };

        if let Err(e) = apply_channel(scene, anim, channel, joint, &mut channels) {
            tracing::warn!(
                "Animation '{}': dropping channel {} ({} on node {}): {}",
                name,
                channel_index,
                channel.path,
                channel.target_node,
                e
            );
        }
    }

    let duration = channels
        .iter()
        .filter_map(JointChannel::last_time)
        .fold(0.0f64, |acc, t| acc.max(t as f64));

    AnimationTrack {
        name,
        duration,
        ticks_per_second: TICKS_PER_SECOND,
        channels,
    }
}

fn resolve_target(channel: &SourceChannel, joint_map: Option<&JointMap>) -> Option<u32> {
    match joint_map {
        Some(map) => map.get(&channel.target_node).copied(),
        None => Some(channel.target_node as u32),
    }
}

/// Fetch one channel's keys into the entry of `joint`.
fn apply_channel(
    scene: &SourceScene,
    anim: &SourceAnimation,
    channel: &SourceChannel,
    joint: u32,
    channels: &mut Vec<JointChannel>,
) -> ExportResult<()> {
    let path = channel.path.as_str();
    if !matches!(path, "translation" | "rotation" | "scale") {
        tracing::debug!("Ignoring '{}' channel on node {}", path, channel.target_node);
        return Ok(());
    }

    let sampler = anim
        .samplers
        .get(channel.sampler)
        .ok_or_else(|| ExportError::out_of_range("sampler", channel.sampler, anim.samplers.len()))?;
    let interpolation = Interpolation::from_name(&sampler.interpolation);

    let times: Vec<f32> = fetch(scene, sampler.input)?;
    let outputs: Vec<[f32; 4]> = fetch(scene, sampler.output)?;

    // Cubic spline outputs are (in-tangent, value, out-tangent) triples
    let values: Vec<[f32; 4]> = if interpolation == Interpolation::CubicSpline {
        if outputs.len() != times.len() * 3 {
            return Err(ExportError::out_of_range(
                "cubic spline output count",
                outputs.len(),
                times.len() * 3,
            ));
        }
        outputs.chunks_exact(3).map(|triple| triple[1]).collect()
    } else {
        if outputs.len() != times.len() {
            return Err(ExportError::out_of_range(
                "sampler output count",
                outputs.len(),
                times.len(),
            ));
        }
        outputs
    };

    let index = joint as usize;
    if channels.len() <= index {
        channels.resize_with(index + 1, JointChannel::default);
    }
    let entry = &mut channels[index];
    entry.interpolation = interpolation;

    let keys = times.iter().zip(&values);
    let vec3 = |(&t, &[x, y, z, _]): (&f32, &[f32; 4])| Keyframe::new(t, [x, y, z]);
    match path {
        "translation" => entry.position_keys = keys.map(vec3).collect(),
        "scale" => entry.scale_keys = keys.map(vec3).collect(),
        _ => entry.rotation_keys = keys.map(|(&t, &v)| Keyframe::new(t, v)).collect(),
    }

    Ok(())
}
