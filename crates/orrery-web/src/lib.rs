pub mod context;
pub mod loader;
pub mod runner;
pub mod webgl;

use orrery_engine::{App, AssetManifest};
use wasm_bindgen::JsValue;

pub use context::{ContextError, GlContext};
pub use loader::{load_all, WebAsset};
pub use runner::AppRunner;
pub use webgl::WebGlDevice;

pub use log;
pub use orrery_engine::InputEvent;

/// Install the panic hook and the console logger. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Acquire the WebGL context and create a runner in its loading phase.
/// `canvas_id` overrides the app's configured canvas when non-empty.
pub fn create_runner<A: App>(canvas_id: &str) -> Result<(AppRunner<A>, AssetManifest), JsValue> {
    let mut config = A::config();
    if !canvas_id.is_empty() {
        config.canvas_id = canvas_id.to_string();
    }
    let manifest = A::manifest().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let context = GlContext::acquire(&config.canvas_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (width, height) = (context.width(), context.height());
    let device = WebGlDevice::new(context.gl);
    log::info!("loading {} assets", manifest.len());
    Ok((AppRunner::new(device, config, width, height), manifest))
}

/// Generate all `#[wasm_bindgen]` exports for an app.
///
/// Generates `thread_local!` storage for the `AppRunner`, a `with_runner()`
/// helper, and the exports `orrery_start`, `orrery_frame` and the input
/// handlers. The host page calls `orrery_start(canvas_id)` once and then
/// `orrery_frame(timestamp)` from `requestAnimationFrame`.
///
/// # Usage
///
/// ```ignore
/// mod game;
/// use game::SolarSystem;
///
/// orrery_web::export_app!(SolarSystem, "solar-system");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`.
#[macro_export]
macro_rules! export_app {
    ($app_type:ty, $app_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::AppRunner<$app_type>>> = RefCell::new(None);
        }

        /// Runs `f` on the runner, or returns `None` before `orrery_start`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::AppRunner<$app_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_start(canvas_id: &str) -> Result<(), ::wasm_bindgen::JsValue> {
            $crate::init_logging();
            let (runner, manifest) = $crate::create_runner::<$app_type>(canvas_id)?;
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            // Must run outside `with_runner`: an empty manifest completes synchronously.
            $crate::load_all(&manifest, |report| {
                with_runner(|r| r.finish_loading(report));
            });
            $crate::log::info!("{}: started", $app_name);
            Ok(())
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_frame(timestamp_ms: f64) {
            with_runner(|r| r.frame(timestamp_ms));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerDown { x, y }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerUp { x, y }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::PointerMove { x, y }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_wheel(delta: f32) {
            with_runner(|r| r.push_input($crate::InputEvent::Wheel { delta }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::KeyDown { key_code }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::KeyUp { key_code }));
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        pub fn orrery_resize(width: u32, height: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::Resize { width, height }));
        }
    };
}
