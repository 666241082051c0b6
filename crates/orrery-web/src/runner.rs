use std::rc::Rc;

use orrery_engine::{
    BodyManifest, EngineContext, FrameRenderer, InputEvent, InputQueue, LoadInbox, OrreryConfig,
    ProtocolLayout, Showcase,
};
use orrery_engine::{run_pipeline, GeometryId};

use crate::fetch::FetchSource;

/// Generic runner that wires a showcase to the browser.
///
/// Each concrete scene keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct ShowcaseRunner<S: Showcase> {
    showcase: S,
    ctx: EngineContext,
    input: InputQueue,
    renderer: FrameRenderer,
    source: Rc<FetchSource>,
    inbox: LoadInbox,
    /// Interleaved vertices of the geometry last staged for upload.
    staging: Vec<f32>,
    initialized: bool,
}

impl<S: Showcase> ShowcaseRunner<S> {
    pub fn new(showcase: S) -> Self {
        let config = showcase.config();
        Self::with_config(showcase, config)
    }

    /// Like `new`, with a JSON override of the showcase's config.
    /// Bad JSON is logged and the showcase's own config is used.
    pub fn with_overrides(showcase: S, json: &str) -> Self {
        let config = match OrreryConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid config JSON, using defaults: {}", e);
                showcase.config()
            }
        };
        Self::with_config(showcase, config)
    }

    fn with_config(showcase: S, config: OrreryConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            showcase,
            ctx: EngineContext::new(config),
            input: InputQueue::new(),
            renderer: FrameRenderer::new(layout),
            source: Rc::new(FetchSource::default()),
            inbox: LoadInbox::new(),
            staging: Vec::new(),
            initialized: false,
        }
    }

    /// Point asset fetches at another root. Call before `init`.
    pub fn set_asset_base(&mut self, base_url: &str) {
        self.source = Rc::new(FetchSource::new(base_url));
    }

    /// Populate the scene, apply the initial scroll and start all loads.
    pub fn init(&mut self) {
        let fallback = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let mut rng = self.ctx.config.rng(fallback);
        self.showcase.init(&mut self.ctx, &mut rng);

        let top = self.ctx.config.initial_top;
        self.ctx.on_scroll(top);

        self.dispatch_loads();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Start a detached pipeline for every queued request.
    fn dispatch_loads(&mut self) {
        for request in self.ctx.take_pending_loads() {
            let source = Rc::clone(&self.source);
            let inbox = self.inbox.clone();
            wasm_bindgen_futures::spawn_local(async move {
                run_pipeline(&*source, request, inbox).await;
            });
        }
    }

    /// One display refresh: apply input, materialize finished loads, run tasks, draw.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        for event in self.input.drain() {
            self.ctx.handle_input(&event);
        }

        for outcome in self.inbox.drain() {
            self.ctx.complete_load(outcome);
        }
        self.dispatch_loads();

        self.ctx.frame(&mut self.renderer);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
    }

    /// Queue every body in a JSON manifest.
    pub fn load_manifest(&mut self, json: &str) {
        match BodyManifest::from_json(json) {
            Ok(manifest) => {
                log::info!("Manifest: {} bodies", manifest.bodies.len());
                for body in manifest.bodies {
                    self.ctx.request_load(body);
                }
                if self.initialized {
                    self.dispatch_loads();
                }
            }
            Err(e) => log::error!("Failed to parse body manifest: {}", e),
        }
    }

    // ---- Frame buffer accessors ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.renderer.buffer_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.renderer.layout().buffer_total_floats as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.renderer.layout().max_instances as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.renderer.instance_count() as u32
    }

    // ---- Geometry upload ----

    pub fn geometry_count(&self) -> u32 {
        self.ctx.geometries.len() as u32
    }

    /// Interleave geometry `id` into the staging buffer. Returns its float count.
    pub fn stage_geometry(&mut self, id: u32) -> u32 {
        self.staging = self
            .ctx
            .geometries
            .get(GeometryId(id))
            .map(|mesh| mesh.interleaved())
            .unwrap_or_default();
        self.staging.len() as u32
    }

    pub fn staging_ptr(&self) -> *const f32 {
        self.staging.as_ptr()
    }

    // ---- JSON side channels ----

    pub fn texture_manifest(&self) -> String {
        self.renderer.textures().manifest_json()
    }

    pub fn load_report(&self) -> String {
        serde_json::to_string(&self.ctx.load_report()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn task_count(&self) -> u32 {
        self.ctx.scheduler.task_count() as u32
    }
}
