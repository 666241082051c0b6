use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::source::join_path;

/// Everything needed to turn one `.mtl` + `.obj` pair into a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Tag given to the resulting entity.
    pub name: String,
    /// Directory prefix, e.g. `"mercury/"`.
    pub base_path: String,
    pub material_file: String,
    pub geometry_file: String,
    /// Uniform scale applied to all three axes.
    pub scale: f32,
    /// Absolute world position.
    pub position: Vec3,
    /// Radians added to `rotation.y` every frame.
    pub rotation_speed: f32,
}

impl LoadRequest {
    /// Conventional layout: `<name>/<name>.mtl` and `<name>/<name>.obj`.
    pub fn conventional(name: &str, scale: f32, position: Vec3, rotation_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            base_path: format!("{}/", name),
            material_file: format!("{}.mtl", name),
            geometry_file: format!("{}.obj", name),
            scale,
            position,
            rotation_speed,
        }
    }

    pub fn material_path(&self) -> String {
        join_path(&self.base_path, &self.material_file)
    }

    pub fn geometry_path(&self) -> String {
        join_path(&self.base_path, &self.geometry_file)
    }
}

/// JSON list of bodies, fed by the host at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyManifest {
    pub bodies: Vec<LoadRequest>,
}

impl BodyManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
