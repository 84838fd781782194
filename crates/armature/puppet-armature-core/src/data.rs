//! Canonical armature data model.
//!
//! The armature exclusively owns its bones, IK families, animations and
//! styles. Bones refer to their parent by plain index into the owned bone
//! array (arena + index pattern); the index must precede the bone so the
//! hierarchy resolves in one forward pass. Everything here is immutable for
//! the duration of an animate step; per-frame resolved state lives in
//! [`crate::hierarchy::Prop`], never back here.

use serde::{Deserialize, Serialize};

use crate::error::ArmatureError;
use crate::math::Vec2;

/// Node in the skeleton tree with an authored rest transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone; `None` for roots. Must be smaller than this
    /// bone's own index.
    pub parent: Option<usize>,
    /// Local rest position, authored with +Y up.
    pub pos: Vec2,
    /// Local rest rotation in radians, counter-clockwise.
    pub rot: f32,
    /// Local rest scale.
    pub scale: Vec2,
    /// Back-to-front draw order; larger draws later.
    pub zindex: i32,
    /// Index into a style's texture-region table. `None` means the bone is a
    /// pure transform node and contributes nothing to compositing.
    pub tex_region: Option<usize>,
}

impl Default for Bone {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            pos: Vec2::ZERO,
            rot: 0.0,
            scale: Vec2::ONE,
            zindex: 0,
            tex_region: None,
        }
    }
}

/// Animated element of a bone's local transform.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Element {
    PositionX,
    PositionY,
    Rotation,
    ScaleX,
    ScaleY,
}

/// One authored sample: at `frame`, `bone`'s `element` equals `value`.
/// Keyframes of a loaded animation are ordered by frame within each
/// (bone, element) track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: i32,
    pub bone: usize,
    pub element: Element,
    pub value: f32,
}

/// Named keyframe clip. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    /// Frames per second of authored time; must be positive.
    pub fps: u32,
    pub keyframes: Vec<Keyframe>,
}

impl Animation {
    /// Duration of the clip in frames (the largest authored frame).
    pub fn last_frame(&self) -> i32 {
        self.keyframes.iter().map(|k| k.frame).max().unwrap_or(0)
    }
}

/// Where an IK chain reaches toward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum IkTarget {
    /// Track another bone's resolved world position.
    Bone(usize),
    /// Fixed point in armature space.
    Point(Vec2),
}

/// Ordered chain of bone indices solved together toward a target.
/// Chain order runs root-ward to effector; the last bone is the effector
/// whose position the solver drives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IkFamily {
    pub name: String,
    pub bones: Vec<usize>,
    pub target: IkTarget,
    /// Permit joints to accumulate rotation past a full turn. Combined with
    /// the solver's own flag; either grants it.
    #[serde(default)]
    pub full_rotation: bool,
}

/// Axis-aligned rectangle within the shared atlas image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureRegion {
    pub name: String,
    pub offset: Vec2,
    pub size: Vec2,
}

/// Named table of texture regions, all addressing one shared atlas image.
/// Shared read-only by every prop that references it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub textures: Vec<TextureRegion>,
}

/// The full animatable entity: skeleton, IK chains, clips and styling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Armature {
    pub bones: Vec<Bone>,
    #[serde(default)]
    pub ik_families: Vec<IkFamily>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    #[serde(default)]
    pub styles: Vec<Style>,
}

impl Armature {
    /// Check the structural invariants every other module relies on.
    ///
    /// Fails fast with the offending index on the first broken reference:
    /// a parent that is missing or does not precede its bone, an IK chain or
    /// target naming a bone that does not exist, a keyframe addressing a
    /// missing bone, a zero frame rate, or a bone texture region outside a
    /// style's table. A bone absent from an animation track is not an error.
    pub fn validate(&self) -> Result<(), ArmatureError> {
        let bone_count = self.bones.len();

        for (index, bone) in self.bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= bone_count {
                    return Err(ArmatureError::MissingParent {
                        bone: index,
                        parent,
                    });
                }
                if parent >= index {
                    return Err(ArmatureError::ParentOutOfOrder {
                        bone: index,
                        parent,
                    });
                }
            }
            if let Some(region) = bone.tex_region {
                for style in &self.styles {
                    if region >= style.textures.len() {
                        return Err(ArmatureError::TextureRegionOutOfBounds {
                            style: style.name.clone(),
                            region,
                            count: style.textures.len(),
                        });
                    }
                }
            }
        }

        for family in &self.ik_families {
            for &bone in &family.bones {
                if bone >= bone_count {
                    return Err(ArmatureError::IkChainBoneOutOfRange {
                        family: family.name.clone(),
                        bone,
                    });
                }
            }
            if let IkTarget::Bone(bone) = family.target {
                if bone >= bone_count {
                    return Err(ArmatureError::IkTargetOutOfRange {
                        family: family.name.clone(),
                        bone,
                    });
                }
            }
        }

        for animation in &self.animations {
            if animation.fps == 0 {
                return Err(ArmatureError::InvalidFps {
                    animation: animation.name.clone(),
                });
            }
            for (index, key) in animation.keyframes.iter().enumerate() {
                if key.bone >= bone_count {
                    return Err(ArmatureError::KeyframeBoneOutOfRange {
                        animation: animation.name.clone(),
                        index,
                        bone: key.bone,
                    });
                }
            }
        }

        Ok(())
    }
}
