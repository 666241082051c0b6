use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;
use crate::renderer::camera::{Camera3D, CameraConfig};
use crate::systems::orbit::{OrbitConfig, OrbitController, OrbitDelta};

/// How the scroll pose and the orbit gestures share the one camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraPolicy {
    /// Pose = scroll baseline composed with the accumulated orbit offset.
    #[default]
    Composed,
    /// Each writer assigns the camera directly; the last one to run wins.
    LastWriterWins,
}

/// Camera position + XYZ Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Owns the camera. Every camera write goes through here.
pub struct CameraRig {
    camera: Camera3D,
    pub orbit: OrbitController,
    policy: CameraPolicy,
    baseline: CameraPose,
    offset: OrbitDelta,
}

impl CameraRig {
    pub fn new(camera: &CameraConfig, orbit: OrbitConfig, aspect: f32, policy: CameraPolicy) -> Self {
        let camera = Camera3D::new(camera, aspect);
        Self {
            baseline: CameraPose {
                position: camera.position,
                rotation: camera.rotation,
            },
            camera,
            orbit: OrbitController::new(orbit),
            policy,
            offset: OrbitDelta::default(),
        }
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn policy(&self) -> CameraPolicy {
        self.policy
    }

    /// Current scroll baseline.
    pub fn baseline(&self) -> CameraPose {
        self.baseline
    }

    /// Orbit offset accumulated so far (always identity under `LastWriterWins`).
    pub fn offset(&self) -> OrbitDelta {
        self.offset
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.camera.aspect = width / height;
            self.orbit.config.viewport_height = height;
        }
    }

    /// Scroll controller entry point.
    pub fn apply_scroll_pose(&mut self, pose: CameraPose) {
        self.baseline = pose;
        match self.policy {
            CameraPolicy::Composed => self.recompose(),
            CameraPolicy::LastWriterWins => {
                self.camera.position = pose.position;
                self.camera.rotation = pose.rotation;
            }
        }
    }

    /// Pointer/wheel events go to the orbit controller.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.orbit.handle(event)
    }

    /// Per-frame orbit step. Folds pending gestures into the camera.
    pub fn update_orbit(&mut self) {
        let delta = self.orbit.take_delta(&self.camera);
        match self.policy {
            CameraPolicy::Composed => {
                if delta.is_identity() {
                    return;
                }
                self.offset.theta += delta.theta;
                self.offset.phi += delta.phi;
                self.offset.scale *= delta.scale;
                self.offset.pan += delta.pan;
                self.recompose();
            }
            CameraPolicy::LastWriterWins => self.orbit.apply(&mut self.camera, &delta),
        }
    }

    fn recompose(&mut self) {
        // The offset never reaches past the orbit limits of the current baseline.
        if !self.offset.is_identity() {
            let position = self.baseline.position + self.offset.pan;
            let center = self.orbit.target + self.offset.pan;
            self.offset = self.orbit.limit_delta(position, center, &self.offset);
        }
        let pose = self.compose(self.baseline, &self.offset);
        self.camera.position = pose.position;
        self.camera.rotation = pose.rotation;
    }

    /// Baseline orbited by `offset` around the (panned) target.
    pub fn compose(&self, baseline: CameraPose, offset: &OrbitDelta) -> CameraPose {
        if offset.is_identity() {
            return baseline;
        }
        let center = self.orbit.target + offset.pan;
        let position = self.orbit.orbit_point(baseline.position + offset.pan, center, offset);
        CameraPose {
            position,
            rotation: baseline.rotation + Vec3::new(offset.phi, offset.theta, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(policy: CameraPolicy) -> CameraRig {
        CameraRig::new(&CameraConfig::default(), OrbitConfig::default(), 1.0, policy)
    }

    fn pose(top: f32) -> CameraPose {
        CameraPose {
            position: Vec3::new(30.0 - 0.1 * top, -0.1 * top, -0.2 * top),
            rotation: Vec3::new(0.0, -0.05 * top, 0.0),
        }
    }

    fn drag(rig: &mut CameraRig, dx: f32) {
        rig.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: 0 });
        rig.handle_input(&InputEvent::PointerMove { x: dx, y: 0.0 });
        rig.handle_input(&InputEvent::PointerUp { x: dx, y: 0.0 });
    }

    #[test]
    fn starts_at_configured_camera() {
        let rig = rig(CameraPolicy::Composed);
        assert_eq!(rig.camera().position, Vec3::new(0.0, 0.0, 800.0));
    }

    #[test]
    fn composed_without_gestures_is_the_scroll_pose() {
        let mut rig = rig(CameraPolicy::Composed);
        rig.apply_scroll_pose(pose(-400.0));
        rig.update_orbit();
        assert_eq!(rig.camera().position, pose(-400.0).position);
        assert_eq!(rig.camera().rotation, pose(-400.0).rotation);
    }

    #[test]
    fn composed_keeps_orbit_offset_across_scrolls() {
        let mut rig = rig(CameraPolicy::Composed);
        rig.apply_scroll_pose(pose(-100.0));
        drag(&mut rig, 100.0);
        rig.update_orbit();
        let theta = rig.offset().theta;
        assert!(theta < 0.0);

        rig.apply_scroll_pose(pose(-200.0));
        assert_eq!(rig.offset().theta, theta);
        assert_eq!(rig.baseline(), pose(-200.0));
        let expected = rig.compose(pose(-200.0), &rig.offset());
        assert_eq!(rig.camera().position, expected.position);
        assert_ne!(rig.camera().position, pose(-200.0).position);
        // Distance to the target is preserved by a pure rotation.
        assert!((rig.camera().position.length() - pose(-200.0).position.length()).abs() < 1e-2);
    }

    fn drag_vertical(rig: &mut CameraRig, dy: f32) {
        rig.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: 0 });
        rig.handle_input(&InputEvent::PointerMove { x: 0.0, y: dy });
        rig.handle_input(&InputEvent::PointerUp { x: 0.0, y: dy });
        rig.update_orbit();
    }

    #[test]
    fn composed_offset_stops_at_the_polar_limit() {
        let mut rig = rig(CameraPolicy::Composed);
        rig.apply_scroll_pose(pose(0.0));
        drag_vertical(&mut rig, 2000.0);
        let pinned = rig.camera().position;
        assert!(pinned.y > 29.9);
        assert!(rig.offset().phi.abs() <= std::f32::consts::FRAC_PI_2);
        assert!(rig.camera().rotation.x.abs() <= std::f32::consts::FRAC_PI_2);

        // Dragging back moves the camera at once.
        drag_vertical(&mut rig, -100.0);
        assert!(rig.camera().position.y < 25.0);
        assert!(rig.camera().position.is_finite());
    }

    #[test]
    fn composed_dolly_stops_at_max_distance() {
        let mut rig = rig(CameraPolicy::Composed);
        rig.orbit.config.max_distance = 40.0;
        rig.apply_scroll_pose(pose(0.0));
        for _ in 0..20 {
            rig.handle_input(&InputEvent::Wheel { delta_y: 1.0 });
        }
        rig.update_orbit();
        assert!((rig.offset().scale * 30.0 - 40.0).abs() < 1e-3);

        rig.handle_input(&InputEvent::Wheel { delta_y: -1.0 });
        rig.update_orbit();
        assert!((rig.camera().position.length() - 38.0).abs() < 1e-2);
    }

    #[test]
    fn last_writer_wins_scroll_assigns_directly() {
        let mut rig = rig(CameraPolicy::LastWriterWins);
        rig.apply_scroll_pose(pose(-300.0));
        assert_eq!(rig.camera().position, pose(-300.0).position);
        assert_eq!(rig.camera().rotation, pose(-300.0).rotation);
    }

    #[test]
    fn last_writer_wins_orbit_update_reaims_at_target() {
        let mut rig = rig(CameraPolicy::LastWriterWins);
        rig.apply_scroll_pose(pose(-300.0));
        rig.update_orbit();
        let cam = rig.camera();
        let expected = (rig.orbit.target - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-3);
        assert!(rig.offset().is_identity());
    }

    #[test]
    fn resize_updates_aspect_and_drag_scale() {
        let mut rig = rig(CameraPolicy::Composed);
        rig.resize(1600.0, 800.0);
        assert_eq!(rig.camera().aspect, 2.0);
        assert_eq!(rig.orbit.config.viewport_height, 800.0);
        rig.resize(0.0, 0.0);
        assert_eq!(rig.camera().aspect, 2.0);
    }
}
