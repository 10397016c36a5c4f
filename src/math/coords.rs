//! Conversion between the authoring tool's coordinate system and the engine's.
//!
//! The source is right-handed and Z-up, with intrinsic XYZ Euler angles in radians. The target is
//! left-handed and Y-up, with Euler angles in degrees. Going from one to the other swaps Y and Z
//! and mirrors one axis, which is where the sign flips below come from.

use glam::{EulerRot, Quat, Vec3};

/// Transform as stored in the manifest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTransform {
    pub position: Vec3,
    /// Intrinsic XYZ, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Transform expressed in engine space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    pub position: Vec3,
    /// Degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl SourceTransform {
    pub fn to_target(&self) -> TargetTransform {
        convert(self)
    }
}

impl TargetTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Engine-side rotation as a quaternion. Angles are applied Z first, then X, then Y.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}

pub fn convert(source: &SourceTransform) -> TargetTransform {
    TargetTransform {
        position: convert_position(source.position),
        rotation: convert_rotation(source.rotation),
        scale: convert_scale(source.scale),
    }
}

pub fn convert_position(position: Vec3) -> Vec3 {
    Vec3::new(-position.x, position.z, -position.y)
}

pub fn convert_rotation(radians: Vec3) -> Vec3 {
    let degrees = Vec3::new(
        radians.x.to_degrees(),
        radians.y.to_degrees(),
        radians.z.to_degrees(),
    );
    Vec3::new(degrees.x, -degrees.z, -degrees.y)
}

/// Scale only follows the axis swap. Magnitudes are never mirrored.
pub fn convert_scale(scale: Vec3) -> Vec3 {
    swap_yz(scale)
}

fn swap_yz(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}
