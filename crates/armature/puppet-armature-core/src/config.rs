//! Options for the per-frame animate call.
//!
//! One explicit structure instead of loose positional parameters: the
//! screen-space placement of the armature and the cross-fade counters for
//! the active animation tracks all travel together.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimateOptions {
    /// Screen-space offset added after scaling.
    pub position: Vec2,
    /// Non-uniform armature-to-screen scale factor. Negative components
    /// mirror along that axis.
    pub scale: Vec2,
    /// Per-track cross-fade counters: frames remaining in each track's fade.
    /// Entries align with the track list passed to `animate`; missing entries
    /// default to 1 (steady-state track, full unit weight).
    pub blend_frames: Vec<i32>,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            blend_frames: Vec::new(),
        }
    }
}
