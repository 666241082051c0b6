use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub initial_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_position: Vec3::new(0.0, 0.0, 800.0),
        }
    }
}

/// Perspective camera looking down its local -Z axis.
/// Orientation is XYZ Euler angles, like entity transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov_y_degrees: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 32;
}

impl Camera3D {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.initial_position,
            rotation: Vec3::ZERO,
            fov_y_degrees: config.fov_y_degrees,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Right-handed perspective, depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Direction the camera faces in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Re-aim the camera at `target`, keeping world +Y as up.
    pub fn look_at(&mut self, target: Vec3) {
        if (target - self.position).length_squared() < 1e-12 {
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera3D {
        Camera3D::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn starts_at_configured_position() {
        let cam = camera();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 800.0));
        assert_eq!(cam.rotation, Vec3::ZERO);
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let cam = camera();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = camera();
        cam.position = Vec3::new(30.0, 10.0, 20.0);
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let mut cam = camera();
        cam.position = Vec3::new(5.0, -2.0, 9.0);
        let p = cam.view_matrix().transform_point3(cam.position);
        assert!(p.length() < 1e-4);
    }

    #[test]
    fn uniform_is_32_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
