//! Armature document decoding.
//!
//! Parses the structured JSON half of a packaged asset (the container and the
//! atlas image bytes are the host's job) into the canonical entities of
//! [`crate::data`], then checks the structural invariants. Field absence is
//! tolerated wherever a sane default exists (rest scale of 1, no parent, no
//! texture region); broken references are not.

use serde::Deserialize;

use crate::data::{Animation, Armature, Bone, IkFamily, IkTarget, Keyframe, Style, TextureRegion};
use crate::error::ArmatureError;
use crate::math::Vec2;

/// Parse and validate an armature document.
///
/// Keyframes are brought into per-track frame order on load (stable sort, so
/// authored order breaks ties). Any structurally invalid reference fails fast
/// with the offending index; an inert IK chain (fewer than two bones) is kept
/// but warned about.
pub fn parse_armature_json(s: &str) -> Result<Armature, ArmatureError> {
    let doc: RawDocument = serde_json::from_str(s).map_err(|e| ArmatureError::Document {
        reason: e.to_string(),
    })?;

    let bones = doc
        .bones
        .into_iter()
        .map(|raw| Bone {
            name: raw.name,
            parent: raw.parent,
            pos: raw.pos.into(),
            rot: raw.rot,
            scale: raw.scale.into(),
            zindex: raw.zindex,
            tex_region: raw.tex,
        })
        .collect();

    let ik_families = doc
        .ik_families
        .into_iter()
        .map(|raw| IkFamily {
            name: raw.name,
            bones: raw.bones,
            target: match raw.target {
                RawIkTarget::Bone(bone) => IkTarget::Bone(bone),
                RawIkTarget::Point(point) => IkTarget::Point(point.into()),
            },
            full_rotation: raw.full_rotation,
        })
        .collect();

    let animations = doc
        .animations
        .into_iter()
        .map(|raw| {
            let mut keyframes: Vec<Keyframe> = raw
                .keyframes
                .into_iter()
                .map(|k| Keyframe {
                    frame: k.frame,
                    bone: k.bone,
                    element: k.element,
                    value: k.value,
                })
                .collect();
            keyframes.sort_by_key(|k| k.frame);
            Animation {
                name: raw.name,
                fps: raw.fps,
                keyframes,
            }
        })
        .collect();

    let styles = doc
        .styles
        .into_iter()
        .map(|raw| Style {
            name: raw.name,
            textures: raw
                .textures
                .into_iter()
                .map(|t| TextureRegion {
                    name: t.name,
                    offset: t.offset.into(),
                    size: t.size.into(),
                })
                .collect(),
        })
        .collect();

    let armature = Armature {
        bones,
        ik_families,
        animations,
        styles,
    };
    armature.validate()?;

    for family in &armature.ik_families {
        if family.bones.len() < 2 {
            log::warn!(
                "ik family '{}' has {} bone(s) and will never adjust anything",
                family.name,
                family.bones.len(),
            );
        }
    }
    log::debug!(
        "armature document: {} bones, {} ik families, {} animations, {} styles",
        armature.bones.len(),
        armature.ik_families.len(),
        armature.animations.len(),
        armature.styles.len(),
    );

    Ok(armature)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawDocument {
    bones: Vec<RawBone>,
    #[serde(default)]
    ik_families: Vec<RawIkFamily>,
    #[serde(default)]
    animations: Vec<RawAnimation>,
    #[serde(default)]
    styles: Vec<RawStyle>,
}

#[derive(Debug, Deserialize)]
struct RawBone {
    #[serde(default)]
    name: String,
    #[serde(default)]
    parent: Option<usize>,
    #[serde(default)]
    pos: RawVec2,
    #[serde(default)]
    rot: f32,
    #[serde(default = "RawVec2::one")]
    scale: RawVec2,
    #[serde(default)]
    zindex: i32,
    #[serde(default)]
    tex: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawIkFamily {
    #[serde(default)]
    name: String,
    bones: Vec<usize>,
    target: RawIkTarget,
    #[serde(default)]
    full_rotation: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data")]
enum RawIkTarget {
    Bone(usize),
    Point(RawVec2),
}

#[derive(Debug, Deserialize)]
struct RawAnimation {
    name: String,
    fps: u32,
    #[serde(default)]
    keyframes: Vec<RawKeyframe>,
}

#[derive(Debug, Deserialize)]
struct RawKeyframe {
    frame: i32,
    bone: usize,
    element: crate::data::Element,
    value: f32,
}

#[derive(Debug, Deserialize)]
struct RawStyle {
    name: String,
    #[serde(default)]
    textures: Vec<RawTextureRegion>,
}

#[derive(Debug, Deserialize)]
struct RawTextureRegion {
    #[serde(default)]
    name: String,
    #[serde(default)]
    offset: RawVec2,
    size: RawVec2,
}

#[derive(Debug, Default, Deserialize)]
struct RawVec2 {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

impl RawVec2 {
    fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl From<RawVec2> for Vec2 {
    fn from(raw: RawVec2) -> Vec2 {
        Vec2::new(raw.x, raw.y)
    }
}
