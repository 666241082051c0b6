//! Page scroll → camera pose.
//!
//! The pose is linear in `top` and carries no history. The bound spinner
//! entities, by contrast, turn a fixed step on every scroll event.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::core::scene::SceneRegistry;
use crate::renderer::rig::{CameraPose, CameraRig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Camera x at `top == 0`.
    pub base_x: f32,
    pub x_per_top: f32,
    pub y_per_top: f32,
    pub z_per_top: f32,
    pub yaw_per_top: f32,
    /// Added to each spinner's rotation per scroll event.
    pub spin_step: Vec3,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            base_x: 30.0,
            x_per_top: -0.1,
            y_per_top: -0.1,
            z_per_top: -0.2,
            yaw_per_top: -0.05,
            spin_step: Vec3::new(0.05, 0.075, 0.05),
        }
    }
}

pub struct ScrollCameraController {
    pub config: ScrollConfig,
    spinners: Vec<EntityId>,
    last_top: Option<f32>,
}

impl ScrollCameraController {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            spinners: Vec::new(),
            last_top: None,
        }
    }

    /// Camera pose for a given scroll offset.
    pub fn pose_for(&self, top: f32) -> CameraPose {
        let c = &self.config;
        CameraPose {
            position: Vec3::new(c.base_x + top * c.x_per_top, top * c.y_per_top, top * c.z_per_top),
            rotation: Vec3::new(0.0, top * c.yaw_per_top, 0.0),
        }
    }

    /// Register an entity that turns on every scroll event.
    pub fn bind_spinner(&mut self, id: EntityId) {
        if !self.spinners.contains(&id) {
            self.spinners.push(id);
        }
    }

    pub fn spinners(&self) -> &[EntityId] {
        &self.spinners
    }

    /// Offset of the most recent scroll event, if any.
    pub fn last_top(&self) -> Option<f32> {
        self.last_top
    }

    /// Handle one scroll event.
    pub fn on_scroll(&mut self, top: f32, scene: &mut SceneRegistry, rig: &mut CameraRig) {
        self.last_top = Some(top);
        for &id in &self.spinners {
            if let Some(entity) = scene.get_mut(id) {
                entity.transform.rotate_by(self.config.spin_step);
            }
        }

        let pose = self.pose_for(top);
        rig.apply_scroll_pose(pose);
        log::debug!("scroll top={} camera={:?}", top, rig.camera().position);
    }
}

impl Default for ScrollCameraController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::renderer::camera::CameraConfig;
    use crate::renderer::rig::CameraPolicy;
    use crate::systems::orbit::OrbitConfig;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default(), OrbitConfig::default(), 1.0, CameraPolicy::Composed)
    }

    #[test]
    fn pose_at_top_of_page() {
        let scroll = ScrollCameraController::default();
        let pose = scroll.pose_for(0.0);
        assert_eq!(pose.position, Vec3::new(30.0, 0.0, 0.0));
        assert_eq!(pose.rotation, Vec3::ZERO);
    }

    #[test]
    fn pose_is_linear_in_top() {
        let scroll = ScrollCameraController::default();
        let pose = scroll.pose_for(-1000.0);
        assert!((pose.position - Vec3::new(130.0, 100.0, 200.0)).length() < 1e-4);
        assert!((pose.rotation.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn pose_depends_only_on_top() {
        let mut scroll = ScrollCameraController::default();
        let mut scene = SceneRegistry::new();
        let mut rig = rig();
        scroll.on_scroll(-500.0, &mut scene, &mut rig);
        scroll.on_scroll(-20.0, &mut scene, &mut rig);
        let after_history = rig.camera().position;

        let mut fresh_rig = self::rig();
        ScrollCameraController::default().on_scroll(-20.0, &mut scene, &mut fresh_rig);
        assert_eq!(after_history, fresh_rig.camera().position);
        assert_eq!(scroll.last_top(), Some(-20.0));
    }

    #[test]
    fn spinners_accumulate_fixed_steps() {
        let mut scene = SceneRegistry::new();
        scene.insert(Entity::new(EntityId(1)).with_tag("moon"));
        scene.insert(Entity::new(EntityId(2)).with_tag("uranus"));
        scene.insert(Entity::new(EntityId(3)).with_tag("grizz"));

        let mut scroll = ScrollCameraController::default();
        scroll.bind_spinner(EntityId(1));
        scroll.bind_spinner(EntityId(2));
        scroll.bind_spinner(EntityId(2));
        assert_eq!(scroll.spinners().len(), 2);

        let mut rig = rig();
        // Same step regardless of how far the page moved.
        scroll.on_scroll(-1.0, &mut scene, &mut rig);
        scroll.on_scroll(-900.0, &mut scene, &mut rig);

        for id in [EntityId(1), EntityId(2)] {
            let r = scene.get(id).unwrap().rotation();
            assert!((r - Vec3::new(0.1, 0.15, 0.1)).length() < 1e-6);
        }
        assert_eq!(scene.get(EntityId(3)).unwrap().rotation(), Vec3::ZERO);
    }

    #[test]
    fn config_overrides_from_json() {
        let config: ScrollConfig = serde_json::from_str(r#"{ "base_x": 10.0 }"#).unwrap();
        assert_eq!(config.base_x, 10.0);
        assert_eq!(config.z_per_top, -0.2);
    }
}
