use serde::Deserialize;

use crate::assets::loaded::LoadedAssets;
use crate::assets::manifest::AssetManifest;
use crate::error::{AssetError, RenderError};
use crate::input::queue::InputQueue;
use crate::renderer::device::GraphicsDevice;

/// Engine configuration, provided by the app.
/// Every field has a default, so a partial JSON override is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// DOM id of the canvas to render into.
    pub canvas_id: String,
    /// Framebuffer clear colour (RGBA).
    pub clear_color: [f32; 4],
    /// Vertical field of view in degrees.
    pub field_of_view_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Orbit camera damping (0.0 = none).
    pub camera_smoothing: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_id: "webgl-canvas".to_string(),
            clear_color: [0.707, 0.707, 1.0, 1.0],
            field_of_view_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_smoothing: 0.0,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-frame timing and surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the first frame.
    pub elapsed: f64,
    /// Drawing surface width in pixels.
    pub width: u32,
    /// Drawing surface height in pixels.
    pub height: u32,
}

impl FrameContext {
    pub fn new(dt: f32, width: u32, height: u32) -> Self {
        Self { dt, elapsed: 0.0, width, height }
    }

    /// Width over height; 1.0 for a collapsed surface.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// The contract every app must fulfill.
pub trait App: Sized + 'static {
    /// Return engine configuration. Called once before loading.
    fn config() -> AppConfig {
        AppConfig::default()
    }

    /// Assets that must all resolve (or fail) before `build`.
    fn manifest() -> Result<AssetManifest, AssetError>;

    /// Compile programs, upload geometry and set up the scene.
    /// Called once, after the asset barrier releases.
    fn build(
        device: &mut dyn GraphicsDevice,
        assets: &LoadedAssets,
        config: &AppConfig,
    ) -> Result<Self, RenderError>;

    /// Advance one frame. `input` holds every event since the previous frame.
    fn update(&mut self, frame: &FrameContext, input: &InputQueue);

    /// Issue this frame's draw calls.
    fn render(&self, device: &mut dyn GraphicsDevice, frame: &FrameContext);
}
