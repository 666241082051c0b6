pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Showcase, OrreryConfig, EngineContext};
pub use api::types::{EntityId, TaskId, GeometryId};
pub use components::entity::{Entity, EntityKind};
pub use components::material::{Color, TextureRef, Material, StandardMaterial, BasicMaterial};
pub use components::mesh::{Mesh, MeshData, Node, VERTEX_FLOATS};
pub use components::transform::Transform;
pub use core::scene::{SceneRegistry, AmbientLight};
pub use core::geometry::GeometryLibrary;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraConfig, CameraUniform};
pub use renderer::rig::{CameraRig, CameraPolicy, CameraPose};
pub use renderer::frame::FrameRenderer;
pub use renderer::traits::{Renderer, FrameData, NullRenderer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::error::{AssetError, ParseError, StageError, LoadError};
pub use assets::source::{AssetSource, MemorySource};
pub use assets::request::{LoadRequest, BodyManifest};
pub use assets::registry::TextureTable;
pub use assets::pipeline::{
    load_body, run_pipeline, materialize,
    LoadedBody, LoadOutcome, LoadInbox, LoadTracker, LoadReport, LoadFailure,
    MaterialFailurePolicy,
};
pub use bridge::protocol::ProtocolLayout;
pub use systems::orbit::{OrbitController, OrbitConfig, OrbitDelta};
pub use systems::scroll::{ScrollCameraController, ScrollConfig};
pub use systems::starfield::{scatter_stars, StarFieldConfig};
pub use systems::scheduler::{FrameScheduler, RedrawMode, TaskStep, spin};
