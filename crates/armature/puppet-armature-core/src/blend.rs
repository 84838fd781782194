//! Blending of simultaneously-active animation tracks into one pose.
//!
//! Policy: a track participates while its cross-fade counter is positive and
//! contributes with the counter as its weight; a non-positive counter skips
//! the track. Position and scale blend by weighted arithmetic mean. Rotation
//! blends by weighted circular mean: each angle enters as a weighted unit
//! vector and the result is the `atan2` of the sum, which keeps the blend on
//! the short way around the +-PI seam. With no active track the first pose
//! is returned unchanged (nothing is mid-fade; the first track is the steady
//! state).

use crate::math::Vec2;
use crate::sampling::{LocalPose, Pose};

/// Weighted per-bone sums across tracks. Rotations are accumulated as unit
/// vectors so wraparound never averages through the wrong side of the circle.
struct PoseAccumulator {
    pos: Vec<Vec2>,
    rot: Vec<Vec2>,
    scale: Vec<Vec2>,
    weight: f32,
}

impl PoseAccumulator {
    fn new(bone_count: usize) -> Self {
        Self {
            pos: vec![Vec2::ZERO; bone_count],
            rot: vec![Vec2::ZERO; bone_count],
            scale: vec![Vec2::ZERO; bone_count],
            weight: 0.0,
        }
    }

    fn add(&mut self, pose: &Pose, weight: f32) {
        for (index, local) in pose.locals.iter().enumerate().take(self.pos.len()) {
            self.pos[index] += local.pos * weight;
            self.rot[index] += Vec2::new(local.rot.cos(), local.rot.sin()) * weight;
            self.scale[index] += local.scale * weight;
        }
        self.weight += weight;
    }

    fn finalize(self) -> Pose {
        let inv = 1.0 / self.weight;
        let locals = self
            .pos
            .into_iter()
            .zip(self.rot)
            .zip(self.scale)
            .map(|((pos, rot), scale)| LocalPose {
                pos: pos * inv,
                rot: rot.angle(),
                scale: scale * inv,
            })
            .collect();
        Pose { locals }
    }
}

/// Combine sampled poses under per-track cross-fade counters.
///
/// `counters` aligns with `poses`; a missing entry defaults to 1 (steady
/// state, full unit weight). Deterministic for identical inputs.
pub fn blend(poses: &[Pose], counters: &[i32]) -> Pose {
    let Some(first) = poses.first() else {
        return Pose::default();
    };

    let mut accumulator = PoseAccumulator::new(first.len());
    for (index, pose) in poses.iter().enumerate() {
        let counter = counters.get(index).copied().unwrap_or(1);
        if counter <= 0 {
            continue;
        }
        accumulator.add(pose, counter as f32);
    }

    if accumulator.weight <= 0.0 {
        return first.clone();
    }
    accumulator.finalize()
}
