//! Per-frame orchestration: sample, blend, resolve, solve, re-resolve,
//! normalize, composite.
//!
//! One `animate` call runs the whole transform-resolution pipeline to
//! completion, synchronously, with no I/O and no state carried between
//! calls. The armature is read-only for the duration of the step; the caller
//! may mutate bones between frames (manual nudging) and the next step picks
//! the changes up from scratch.

use hashbrown::HashMap;

use crate::blend::blend;
use crate::compositor::{composite, DrawCommand};
use crate::config::AnimateOptions;
use crate::data::{Armature, Style};
use crate::error::ArmatureError;
use crate::hierarchy::{resolve, Prop};
use crate::ik::solve;
use crate::normalize::normalize_prop;
use crate::sampling::{sample_pose, Pose};

/// Playback cursor for one active animation track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackState {
    /// Index into the armature's animation list.
    pub animation: usize,
    /// Frame cursor; see [`crate::sampling::frame_at_time`] and
    /// [`crate::sampling::wrap_frame`] for mapping from elapsed time.
    pub frame: i32,
    pub reverse: bool,
    pub looping: bool,
}

impl TrackState {
    pub fn looping(animation: usize, frame: i32) -> Self {
        Self {
            animation,
            frame,
            reverse: false,
            looping: true,
        }
    }
}

/// Resolve the armature into per-frame props at the given track cursors.
///
/// Data flow: sample each track, blend under the options' cross-fade
/// counters, resolve the hierarchy once as IK input, solve the IK families,
/// resolve again with the rotation overrides, then normalize every prop into
/// screen space. With no tracks the rest pose is resolved. Props are fresh
/// value snapshots; nothing references the armature after the call returns.
pub fn animate(
    armature: &Armature,
    tracks: &[TrackState],
    options: &AnimateOptions,
) -> Result<Vec<Prop>, ArmatureError> {
    let mut poses = Vec::with_capacity(tracks.len());
    for track in tracks {
        let animation = armature.animations.get(track.animation).ok_or(
            ArmatureError::AnimationOutOfRange {
                animation: track.animation,
                count: armature.animations.len(),
            },
        )?;
        poses.push(sample_pose(
            &armature.bones,
            animation,
            track.frame,
            track.reverse,
            track.looping,
        ));
    }

    let pose = if poses.is_empty() {
        Pose::rest(&armature.bones)
    } else {
        blend(&poses, &options.blend_frames)
    };

    let base = resolve(&armature.bones, &pose, &HashMap::new())?;
    let ik_rotations = solve(&armature.bones, &base, &armature.ik_families, false);
    let mut props = resolve(&armature.bones, &pose, &ik_rotations)?;

    for prop in &mut props {
        normalize_prop(prop, options);
    }

    log::trace!(
        "animate: {} tracks -> {} props ({} ik overrides)",
        tracks.len(),
        props.len(),
        ik_rotations.len(),
    );

    Ok(props)
}

/// Composite resolved props into ordered draw commands for the host.
pub fn draw(props: &[Prop], style: &Style) -> Result<Vec<DrawCommand>, ArmatureError> {
    composite(props, style)
}
