//! Puppet Armature Core (host-agnostic)
//!
//! 2D skeletal armature runtime: samples and blends keyframe clips into
//! per-bone local transforms, propagates them through the bone hierarchy,
//! refines designated chains with fixed-iteration inverse kinematics, and
//! composites the result into ordered, textured draw commands. Asset
//! containers, image decoding and the actual pixel blits stay on the host
//! side of the boundary.

pub mod blend;
pub mod compositor;
pub mod config;
pub mod data;
pub mod document;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod ik;
pub mod math;
pub mod normalize;
pub mod sampling;

// Re-exports for consumers (hosts)
pub use blend::blend;
pub use compositor::{composite, DrawCommand};
pub use config::AnimateOptions;
pub use data::{
    Animation, Armature, Bone, Element, IkFamily, IkTarget, Keyframe, Style, TextureRegion,
};
pub use document::parse_armature_json;
pub use engine::{animate, draw, TrackState};
pub use error::ArmatureError;
pub use hierarchy::{resolve, Prop};
pub use ik::{solve, IK_PASSES};
pub use math::Vec2;
pub use normalize::normalize_prop;
pub use sampling::{frame_at_time, sample_pose, wrap_frame, LocalPose, Pose};
