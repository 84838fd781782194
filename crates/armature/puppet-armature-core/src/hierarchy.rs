//! Hierarchical resolution: compose each bone's local transform with its
//! parent's resolved world transform, root to leaf.
//!
//! Bones are visited in array order; the validated `parent < index` invariant
//! means every parent is resolved before its children, so one forward pass
//! suffices (O(bone count)). Composition: the local position is scaled by the
//! parent's world scale and rotated into the parent's frame before
//! translating; rotations add; scales multiply component-wise. Roots compose
//! against identity.
//!
//! Props are fresh value snapshots per call. Nothing borrows from the bones
//! once `resolve` returns, so the same armature can be resolved concurrently
//! for multiple viewports.

use hashbrown::HashMap;

use crate::data::Bone;
use crate::error::ArmatureError;
use crate::math::Vec2;
use crate::sampling::{LocalPose, Pose};

/// Per-frame resolved snapshot of one bone, ready for compositing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prop {
    pub pos: Vec2,
    pub rot: f32,
    pub scale: Vec2,
    pub zindex: i32,
    pub tex_region: Option<usize>,
}

/// Resolve world transforms for every bone.
///
/// `overrides` replaces a bone's local rotation before composition; the IK
/// solver's results are spliced back in this way. A structurally invalid
/// parent reference fails fast with the offending indices rather than
/// substituting a default transform.
pub fn resolve(
    bones: &[Bone],
    pose: &Pose,
    overrides: &HashMap<usize, f32>,
) -> Result<Vec<Prop>, ArmatureError> {
    let mut props: Vec<Prop> = Vec::with_capacity(bones.len());

    for (index, bone) in bones.iter().enumerate() {
        let local = match pose.locals.get(index) {
            Some(local) => *local,
            None => LocalPose::IDENTITY,
        };
        let rot = overrides.get(&index).copied().unwrap_or(local.rot);

        let (parent_pos, parent_rot, parent_scale) = match bone.parent {
            None => (Vec2::ZERO, 0.0, Vec2::ONE),
            Some(parent) => {
                if parent >= bones.len() {
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
                let world = &props[parent];
                (world.pos, world.rot, world.scale)
            }
        };

        props.push(Prop {
            pos: parent_pos + (local.pos * parent_scale).rotated(parent_rot),
            rot: parent_rot + rot,
            scale: parent_scale * local.scale,
            zindex: bone.zindex,
            tex_region: bone.tex_region,
        });
    }

    Ok(props)
}
