//! Mapping from resolved props to ordered draw commands.
//!
//! Props sort ascending by z-index (stable, ties keep original order); props
//! without a texture region are skipped. Each command addresses an atlas
//! sub-region, scales it by the absolute scale, flips along any axis whose
//! scale component is negative (rotation sign was already corrected during
//! normalization, so flips never double-negate it), rotates about the
//! region's own center, and lands that center at the prop's screen position.
//! The host performs the actual blits, in emitted order.

use crate::data::{Style, TextureRegion};
use crate::error::ArmatureError;
use crate::hierarchy::Prop;
use crate::math::Vec2;

/// One blit for the host renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Atlas sub-region to extract.
    pub region: TextureRegion,
    /// Extent of the extracted region after scaling, before rotation.
    pub size: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Radians, counter-clockwise, about the region's center.
    pub rotation: f32,
    /// Screen position of the region's center. Rotation re-centers the
    /// rotated bounding box here.
    pub pos: Vec2,
}

impl DrawCommand {
    /// Unrotated top-left corner of the destination rectangle.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.pos - self.size * 0.5
    }
}

/// Emit draw commands for the props, back to front.
///
/// A texture-region index outside the style's table is a malformed asset and
/// fails fast. A zero-size region or zero effective scale contributes no
/// command, silently.
pub fn composite(props: &[Prop], style: &Style) -> Result<Vec<DrawCommand>, ArmatureError> {
    let mut ordered: Vec<&Prop> = props.iter().collect();
    ordered.sort_by_key(|prop| prop.zindex);

    let mut commands = Vec::with_capacity(ordered.len());
    for prop in ordered {
        let Some(index) = prop.tex_region else {
            continue;
        };
        let region = style.textures.get(index).ok_or_else(|| {
            ArmatureError::TextureRegionOutOfBounds {
                style: style.name.clone(),
                region: index,
                count: style.textures.len(),
            }
        })?;

        let size = region.size * prop.scale.abs();
        if region.size.x <= 0.0 || region.size.y <= 0.0 || size.x <= 0.0 || size.y <= 0.0 {
            continue;
        }

        commands.push(DrawCommand {
            region: region.clone(),
            size,
            flip_x: prop.scale.x < 0.0,
            flip_y: prop.scale.y < 0.0,
            rotation: prop.rot,
            pos: prop.pos,
        });
    }

    Ok(commands)
}
