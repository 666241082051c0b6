//! Renderer trait.
//!
//! All GPU work happens in the host (TypeScript/WebGPU). The engine hands a
//! `FrameData` to a `Renderer` once per draw; the bundled implementation packs
//! it into the shared frame buffer the host reads.

use crate::core::geometry::GeometryLibrary;
use crate::core::scene::SceneRegistry;
use crate::renderer::camera::Camera3D;

/// Everything a backend needs to draw one frame.
pub struct FrameData<'a> {
    pub scene: &'a SceneRegistry,
    pub camera: &'a Camera3D,
    pub geometries: &'a GeometryLibrary,
}

pub trait Renderer {
    /// Backend identifier (e.g., "shared-buffer", "null").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);
}

/// Renderer that draws nothing and counts calls. Useful headless.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub draws: u32,
    /// Entity count seen by the most recent draw.
    pub last_entity_count: usize,
}

impl Renderer for NullRenderer {
    fn backend(&self) -> &'static str {
        "null"
    }

    fn draw(&mut self, frame: &FrameData) {
        self.draws += 1;
        self.last_entity_count = frame.scene.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraConfig;

    #[test]
    fn null_renderer_counts_draws() {
        let scene = SceneRegistry::new();
        let camera = Camera3D::new(&CameraConfig::default(), 1.0);
        let geometries = GeometryLibrary::new();
        let frame = FrameData { scene: &scene, camera: &camera, geometries: &geometries };

        let mut renderer = NullRenderer::default();
        renderer.draw(&frame);
        renderer.draw(&frame);
        assert_eq!(renderer.draws, 2);
        assert_eq!(renderer.backend(), "null");
    }
}
