use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position / Euler rotation / scale of an entity in world space.
///
/// Rotation is stored as XYZ Euler angles in radians so that animation code
/// can increment individual axes (`rotation.y += speed`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Rotation as a quaternion (XYZ order).
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Add `delta` to the Euler angles.
    pub fn rotate_by(&mut self, delta: Vec3) {
        self.rotation += delta;
    }
}
