//! Armature-space to screen-space adjustment of resolved props.
//!
//! Authored space has +Y up; screens have +Y down. Applied once per prop, in
//! this order: vertical flip, caller scale (position and scale both), caller
//! offset, then rotation-sign correction when the resulting scale mirrors
//! exactly one axis. A double mirror (both components negative) is a
//! 180-degree turn and keeps the rotation sign. Pure per prop; no cross-prop
//! dependency.

use crate::config::AnimateOptions;
use crate::hierarchy::Prop;

pub fn normalize_prop(prop: &mut Prop, options: &AnimateOptions) {
    prop.pos.y = -prop.pos.y;

    prop.pos = prop.pos * options.scale;
    prop.scale = prop.scale * options.scale;

    prop.pos += options.position;

    if (prop.scale.x < 0.0) != (prop.scale.y < 0.0) {
        prop.rot = -prop.rot;
    }
}
