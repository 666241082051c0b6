pub mod fetch;
pub mod runner;

pub use fetch::FetchSource;
pub use runner::ShowcaseRunner;

/// Generate all `#[wasm_bindgen]` exports for a showcase.
///
/// Generates:
/// - `thread_local!` storage for the ShowcaseRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, host events, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod showcase;
/// use showcase::MyScene;
///
/// orrery_web::export_showcase!(MyScene, "my-scene");
/// ```
///
/// The showcase type needs a `new()` constructor. The calling crate must
/// depend on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`, and have `InputEvent` in scope.
#[macro_export]
macro_rules! export_showcase {
    ($showcase_type:ty, $showcase_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ShowcaseRunner<$showcase_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ShowcaseRunner<$showcase_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
                f(runner)
            })
        }

        fn install(runner: $crate::ShowcaseRunner<$showcase_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            with_runner(|r| r.init());
            log::info!("{}: initialized", $showcase_name);
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            install($crate::ShowcaseRunner::new(<$showcase_type>::new()));
        }

        /// Same as `scene_init`, with a JSON config override and an asset root.
        #[wasm_bindgen]
        pub fn scene_init_with(config_json: &str, asset_base: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::ShowcaseRunner::with_overrides(<$showcase_type>::new(), config_json);
            runner.set_asset_base(asset_base);
            install(runner);
        }

        #[wasm_bindgen]
        pub fn scene_tick() {
            with_runner(|r| r.tick());
        }

        #[wasm_bindgen]
        pub fn scene_scroll(top: f32) {
            with_runner(|r| r.push_input(InputEvent::Scroll { top }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_down(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_move(x: f32, y: f32, _button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_up(x: f32, y: f32, _button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn scene_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        // ---- Geometry upload ----

        #[wasm_bindgen]
        pub fn get_geometry_count() -> u32 {
            with_runner(|r| r.geometry_count())
        }

        #[wasm_bindgen]
        pub fn stage_geometry(id: u32) -> u32 {
            with_runner(|r| r.stage_geometry(id))
        }

        #[wasm_bindgen]
        pub fn get_staging_ptr() -> *const f32 {
            with_runner(|r| r.staging_ptr())
        }

        // ---- JSON side channels ----

        #[wasm_bindgen]
        pub fn get_texture_manifest() -> String {
            with_runner(|r| r.texture_manifest())
        }

        #[wasm_bindgen]
        pub fn get_load_report() -> String {
            with_runner(|r| r.load_report())
        }

        #[wasm_bindgen]
        pub fn get_task_count() -> u32 {
            with_runner(|r| r.task_count())
        }
    };
}
