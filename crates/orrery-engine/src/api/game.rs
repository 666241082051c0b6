use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::assets::pipeline::{materialize, LoadOutcome, LoadReport, LoadTracker, MaterialFailurePolicy};
use crate::assets::request::LoadRequest;
use crate::components::entity::Entity;
use crate::core::geometry::GeometryLibrary;
use crate::core::scene::SceneRegistry;
use crate::input::queue::InputEvent;
use crate::renderer::camera::CameraConfig;
use crate::renderer::rig::{CameraPolicy, CameraRig};
use crate::renderer::traits::Renderer;
use crate::systems::orbit::OrbitConfig;
use crate::systems::scheduler::{spin, FrameScheduler, RedrawMode};
use crate::systems::scroll::{ScrollConfig, ScrollCameraController};
use crate::systems::starfield::StarFieldConfig;

/// Configuration for the engine, provided by the showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Canvas width in CSS pixels.
    pub viewport_width: f32,
    /// Canvas height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 1024).
    pub max_instances: usize,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub scroll: ScrollConfig,
    pub stars: StarFieldConfig,
    pub camera_policy: CameraPolicy,
    pub redraw_mode: RedrawMode,
    pub material_failure: MaterialFailurePolicy,
    /// Scroll offset applied once at startup.
    pub initial_top: f32,
    /// Star field seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 900.0,
            max_instances: 1024,
            camera: CameraConfig::default(),
            orbit: OrbitConfig::default(),
            scroll: ScrollConfig::default(),
            stars: StarFieldConfig::default(),
            camera_policy: CameraPolicy::default(),
            redraw_mode: RedrawMode::default(),
            material_failure: MaterialFailurePolicy::default(),
            initial_top: 0.0,
            seed: None,
        }
    }
}

impl OrreryConfig {
    /// Parse a (possibly partial) config from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Star field RNG: the configured seed, else `fallback`.
    pub fn rng(&self, fallback: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.unwrap_or(fallback))
    }
}

/// The contract every scene must fulfill.
pub trait Showcase {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> OrreryConfig {
        OrreryConfig::default()
    }

    /// Populate the scene, register tasks and queue loads.
    fn init(&mut self, ctx: &mut EngineContext, rng: &mut ChaCha8Rng);
}

/// Mutable access to engine state, passed to every component.
pub struct EngineContext {
    pub config: OrreryConfig,
    pub scene: SceneRegistry,
    pub rig: CameraRig,
    pub scheduler: FrameScheduler,
    pub scroll: ScrollCameraController,
    pub geometries: GeometryLibrary,
    pub loads: LoadTracker,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: OrreryConfig) -> Self {
        let mut orbit = config.orbit;
        orbit.viewport_height = config.viewport_height;
        let aspect = if config.viewport_height > 0.0 {
            config.viewport_width / config.viewport_height
        } else {
            1.0
        };
        Self {
            scene: SceneRegistry::with_capacity(config.max_instances),
            rig: CameraRig::new(&config.camera, orbit, aspect, config.camera_policy),
            scheduler: FrameScheduler::new(config.redraw_mode),
            scroll: ScrollCameraController::new(config.scroll),
            geometries: GeometryLibrary::new(),
            loads: LoadTracker::new(config.material_failure),
            next_id: 1,
            config,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an entity into the scene.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.insert(entity);
        id
    }

    /// Fire-and-forget: the runner starts the pipeline, the outcome comes back
    /// through `complete_load`.
    pub fn request_load(&mut self, request: LoadRequest) {
        log::debug!("queued load of {}", request.name);
        self.loads.queue(request);
    }

    pub fn take_pending_loads(&mut self) -> Vec<LoadRequest> {
        self.loads.take_pending()
    }

    /// Materialize a finished pipeline. On success the planet is inserted and
    /// gets its own spin task; on failure nothing is inserted.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> Option<EntityId> {
        let LoadOutcome { request, result } = outcome;
        match result {
            Ok(body) => {
                let id = self.next_id();
                let entity = materialize(id, &request, body, &mut self.geometries);
                self.spawn(entity);
                self.loads.record_loaded(&request);
                self.scheduler.register(
                    request.name.clone(),
                    spin(id, Vec3::new(0.0, request.rotation_speed, 0.0)),
                );
                log::info!("Loaded {} at {:?}", request.name, request.position);
                Some(id)
            }
            Err(err) => {
                self.loads.record_failure(&request, &err);
                None
            }
        }
    }

    pub fn load_report(&self) -> LoadReport {
        self.loads.report()
    }

    pub fn on_scroll(&mut self, top: f32) {
        self.scroll.on_scroll(top, &mut self.scene, &mut self.rig);
    }

    /// Route one host event: scroll to the scroll controller, the rest to the orbit controls.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Scroll { top } => self.on_scroll(top),
            _ => {
                self.rig.handle_input(event);
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.rig.resize(width, height);
    }

    /// Run the scheduler once. Returns the number of draws issued.
    pub fn frame(&mut self, renderer: &mut impl Renderer) -> u32 {
        self.scheduler
            .tick(&mut self.scene, &mut self.rig, &self.geometries, renderer)
    }
}
