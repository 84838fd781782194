//! Error taxonomy for the armature runtime.
//!
//! Only structurally malformed assets surface as errors: a reference to a
//! bone, texture region or animation that does not exist. Missing animation
//! data, non-converged IK and degenerate geometry are valid, silent outcomes
//! and deliberately have no variant here.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ArmatureError {
    /// A bone's parent index points past the end of the bone array.
    #[error("bone {bone} references missing parent {parent}")]
    MissingParent { bone: usize, parent: usize },

    /// A bone's parent does not precede it in traversal order, so the tree
    /// cannot be resolved in a single forward pass.
    #[error("bone {bone} has parent {parent} which does not precede it")]
    ParentOutOfOrder { bone: usize, parent: usize },

    /// An IK chain names a bone outside the armature.
    #[error("ik family '{family}' references missing bone {bone}")]
    IkChainBoneOutOfRange { family: String, bone: usize },

    /// An IK family targets a bone outside the armature.
    #[error("ik family '{family}' targets missing bone {bone}")]
    IkTargetOutOfRange { family: String, bone: usize },

    /// A keyframe addresses a bone outside the armature.
    #[error("keyframe {index} of animation '{animation}' references missing bone {bone}")]
    KeyframeBoneOutOfRange {
        animation: String,
        index: usize,
        bone: usize,
    },

    /// Animations must carry a positive frame rate.
    #[error("animation '{animation}' has a frame rate of 0")]
    InvalidFps { animation: String },

    /// A bone's texture-region index is outside a style's region table.
    #[error("texture region {region} out of bounds for style '{style}' ({count} regions)")]
    TextureRegionOutOfBounds {
        style: String,
        region: usize,
        count: usize,
    },

    /// A playback track addresses an animation the armature does not own.
    #[error("track references missing animation {animation} ({count} loaded)")]
    AnimationOutOfRange { animation: usize, count: usize },

    /// The armature document could not be decoded.
    #[error("armature document error: {reason}")]
    Document { reason: String },
}
