//! Iterative inverse kinematics over designated bone chains.
//!
//! Cyclic coordinate descent on a working copy of each chain: every pass
//! walks the joints from nearest-the-effector toward the root, rotating each
//! joint by the angle between (effector - joint) and (target - joint) and
//! carrying the adjusted positions forward so later joints in the same pass
//! see the refined state. The pass count is fixed ([`IK_PASSES`]) with no
//! tolerance check; the output is a best-effort set of final local rotations
//! and callers must not assume exact constraint satisfaction.
//!
//! The solver reads resolved world poses and returns only rotations, keyed by
//! bone index. It mutates neither positions nor scales and never rebuilds the
//! hierarchy; callers re-run [`crate::hierarchy::resolve`] with the returned
//! overrides.

use hashbrown::HashMap;

use crate::data::{Bone, IkFamily, IkTarget};
use crate::hierarchy::Prop;
use crate::math::wrap_angle;

/// Refinement passes per chain. Fixed; there is no convergence check.
pub const IK_PASSES: usize = 10;

const DEGENERATE_LENGTH: f32 = 1e-6;

/// Solve every IK family against the given resolved pose.
///
/// Returns final local rotations for adjusted chain bones, suitable as
/// hierarchy overrides. Re-running on an already-converged pose returns the
/// rotations unchanged. `use_full_rotation` (or the family's own flag) lets
/// joints accumulate rotation unboundedly; otherwise each joint's correction
/// is normalized into (-PI, PI].
pub fn solve(
    bones: &[Bone],
    props: &[Prop],
    families: &[IkFamily],
    use_full_rotation: bool,
) -> HashMap<usize, f32> {
    let mut overrides = HashMap::new();

    for family in families {
        if family.bones.len() < 2 {
            // A chain without a joint-effector pair has nothing to adjust.
            continue;
        }
        let mut joints: Vec<_> = family
            .bones
            .iter()
            .filter_map(|&bone| props.get(bone).map(|prop| prop.pos))
            .collect();
        if joints.len() != family.bones.len() {
            continue;
        }
        let target = match family.target {
            IkTarget::Bone(bone) => match props.get(bone) {
                Some(prop) => prop.pos,
                None => continue,
            },
            IkTarget::Point(point) => point,
        };

        let full_rotation = use_full_rotation || family.full_rotation;
        let mut deltas = vec![0.0f32; joints.len()];

        for _ in 0..IK_PASSES {
            // The last chain bone is the effector; its own rotation cannot
            // move its position, so only the joints before it turn.
            for joint in (0..joints.len() - 1).rev() {
                let effector = joints[joints.len() - 1];
                let to_effector = effector - joints[joint];
                let to_target = target - joints[joint];
                if to_effector.length() <= DEGENERATE_LENGTH
                    || to_target.length() <= DEGENERATE_LENGTH
                {
                    continue;
                }
                let delta = wrap_angle(to_target.angle() - to_effector.angle());

                deltas[joint] += delta;
                if !full_rotation {
                    deltas[joint] = wrap_angle(deltas[joint]);
                }
                for downstream in joint + 1..joints.len() {
                    joints[downstream] =
                        joints[joint] + (joints[downstream] - joints[joint]).rotated(delta);
                }
            }
        }

        for (position, &bone) in family.bones.iter().enumerate().take(joints.len() - 1) {
            let local_rot = local_rotation(bones, props, bone);
            overrides.insert(bone, local_rot + deltas[position]);
        }
    }

    overrides
}

/// Recover a bone's local rotation from the resolved pose.
fn local_rotation(bones: &[Bone], props: &[Prop], bone: usize) -> f32 {
    let world = match props.get(bone) {
        Some(prop) => prop.rot,
        None => return 0.0,
    };
    match bones.get(bone).and_then(|b| b.parent) {
        Some(parent) => world - props.get(parent).map(|p| p.rot).unwrap_or(0.0),
        None => world,
    }
}
