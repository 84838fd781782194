//! Keyframe sampling: one local transform per bone at a frame cursor.
//!
//! Model:
//! - An animation is a flat keyframe list; the (bone, element) pairs form the
//!   tracks, ordered by frame within each track.
//! - Sampling seeds every bone from its authored rest transform, then
//!   overwrites each authored element with the value interpolated between the
//!   two keyframes surrounding the cursor. A bone absent from a track keeps
//!   its rest value and sampling continues.
//! - A cursor outside the clip wraps when `looping`, clamps otherwise;
//!   `reverse` mirrors the cursor around the clip's last frame.
//!
//! Sampling never mutates the animation.

use hashbrown::HashMap;

use crate::data::{Animation, Bone, Element, Keyframe};
use crate::math::{lerp_f32, Vec2};

/// Local transform of one bone within a sampled pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalPose {
    pub pos: Vec2,
    pub rot: f32,
    pub scale: Vec2,
}

impl LocalPose {
    pub const IDENTITY: LocalPose = LocalPose {
        pos: Vec2::ZERO,
        rot: 0.0,
        scale: Vec2::ONE,
    };

    #[inline]
    fn rest_of(bone: &Bone) -> Self {
        Self {
            pos: bone.pos,
            rot: bone.rot,
            scale: bone.scale,
        }
    }

    #[inline]
    fn set(&mut self, element: Element, value: f32) {
        match element {
            Element::PositionX => self.pos.x = value,
            Element::PositionY => self.pos.y = value,
            Element::Rotation => self.rot = value,
            Element::ScaleX => self.scale.x = value,
            Element::ScaleY => self.scale.y = value,
        }
    }
}

/// Per-bone local transforms at one instant; one entry per armature bone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    pub locals: Vec<LocalPose>,
}

impl Pose {
    /// The armature's rest pose: every bone at its authored local transform.
    pub fn rest(bones: &[Bone]) -> Self {
        Self {
            locals: bones.iter().map(LocalPose::rest_of).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locals.is_empty()
    }
}

/// Map elapsed wall time to a raw frame cursor for a clip.
#[inline]
pub fn frame_at_time(animation: &Animation, elapsed_secs: f32) -> i32 {
    (elapsed_secs.max(0.0) * animation.fps as f32) as i32
}

/// Bring a raw frame cursor into the clip: wrap into [0, last_frame) when
/// `looping`, clamp to [0, last_frame] otherwise.
#[inline]
pub fn wrap_frame(animation: &Animation, frame: i32, looping: bool) -> i32 {
    let last = animation.last_frame();
    if last <= 0 {
        return 0;
    }
    if looping {
        frame.rem_euclid(last)
    } else {
        frame.clamp(0, last)
    }
}

/// Sample `animation` at `frame`, producing one local transform per bone.
pub fn sample_pose(
    bones: &[Bone],
    animation: &Animation,
    frame: i32,
    reverse: bool,
    looping: bool,
) -> Pose {
    let mut pose = Pose::rest(bones);

    let mut cursor = wrap_frame(animation, frame, looping);
    if reverse {
        cursor = animation.last_frame() - cursor;
    }

    // One scan collects, per (bone, element) track, the authored keyframes
    // surrounding the cursor. Per-track frame order makes "latest at-or-before"
    // and "first at-or-after" exact.
    let mut tracks: HashMap<(usize, Element), (Option<&Keyframe>, Option<&Keyframe>)> =
        HashMap::new();
    for key in &animation.keyframes {
        let entry = tracks.entry((key.bone, key.element)).or_insert((None, None));
        if key.frame <= cursor {
            entry.0 = Some(key);
        }
        if key.frame >= cursor && entry.1.is_none() {
            entry.1 = Some(key);
        }
    }

    for ((bone, element), surrounding) in tracks {
        let Some(local) = pose.locals.get_mut(bone) else {
            continue;
        };
        let value = match surrounding {
            (Some(before), Some(after)) if after.frame > before.frame => {
                let t = (cursor - before.frame) as f32 / (after.frame - before.frame) as f32;
                lerp_f32(before.value, after.value, t)
            }
            (Some(before), _) => before.value,
            (None, Some(after)) => after.value,
            (None, None) => continue,
        };
        local.set(element, value);
    }

    pose
}
