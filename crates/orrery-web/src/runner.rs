use log::{error, info, warn};
use orrery_engine::{
    App, AppConfig, FrameClock, FrameContext, GraphicsDevice, InputEvent, InputQueue,
    LoadReport, LoadedAssets,
};

use crate::loader::WebAsset;
use crate::webgl::WebGlDevice;

enum Phase<A> {
    /// Waiting for the asset barrier.
    Loading,
    Running(A),
    /// `App::build` failed; nothing renders.
    Failed,
}

/// Generic app runner that wires the engine loop to a device.
///
/// Each concrete app creates a `thread_local!` AppRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_app!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct AppRunner<A: App, D: GraphicsDevice = WebGlDevice> {
    device: D,
    config: AppConfig,
    phase: Phase<A>,
    input: InputQueue,
    clock: FrameClock,
    width: u32,
    height: u32,
}

impl<A: App, D: GraphicsDevice> AppRunner<A, D> {
    pub fn new(device: D, config: AppConfig, width: u32, height: u32) -> Self {
        Self {
            device,
            config,
            phase: Phase::Loading,
            input: InputQueue::new(),
            clock: FrameClock::new(),
            width,
            height,
        }
    }

    /// Build the app from loaded assets. Called once when loading completes.
    pub fn build(&mut self, assets: &LoadedAssets) {
        if !matches!(self.phase, Phase::Loading) {
            warn!("app already built; ignoring second build");
            return;
        }
        self.phase = match A::build(&mut self.device, assets, &self.config) {
            Ok(app) => {
                info!("scene built from {} assets", assets.len());
                Phase::Running(app)
            }
            Err(e) => {
                error!("scene build failed: {}", e);
                Phase::Failed
            }
        };
    }

    /// Queue an input event for the next frame. Resizes apply immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.width = width;
            self.height = height;
        }
        self.input.push(event);
    }

    /// Run one frame at host timestamp `now_ms`: update, drain input, render.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.tick(now_ms);
        let Phase::Running(app) = &mut self.phase else {
            self.input.drain();
            return;
        };
        let frame = FrameContext {
            dt,
            elapsed: self.clock.elapsed(),
            width: self.width,
            height: self.height,
        };

        app.update(&frame, &self.input);
        self.input.drain();
        app.render(&mut self.device, &frame);
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn app(&self) -> Option<&A> {
        match &self.phase {
            Phase::Running(app) => Some(app),
            _ => None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<A: App> AppRunner<A, WebGlDevice> {
    /// Turn a completed load into `LoadedAssets` (uploading images as
    /// textures) and build the app.
    pub fn finish_loading(&mut self, report: LoadReport<WebAsset>) {
        let mut assets = LoadedAssets::new();
        for (entry, asset) in report.loaded {
            match asset {
                WebAsset::Text(text) => assets.insert_text(entry.name, text),
                WebAsset::Json(value) => assets.insert_json(entry.name, value),
                WebAsset::Image(image) => match self.device.upload_image(&image) {
                    Ok(texture) => assets.insert_texture(entry.name, texture),
                    Err(e) => warn!("texture '{}' not uploaded: {}", entry.name, e),
                },
            }
        }
        if !report.failed.is_empty() {
            warn!("{} assets failed to load; dependent geometry will be skipped", report.failed.len());
        }
        self.build(&assets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{AssetManifest, AssetError, DeviceCommand, RecordingDevice, RenderError};

    /// Records what the runner feeds it.
    struct Tally {
        updates: u32,
        last_dt: f32,
        last_size: (u32, u32),
        keys_seen: usize,
    }

    impl App for Tally {
        fn manifest() -> Result<AssetManifest, AssetError> {
            Ok(AssetManifest::default())
        }

        fn build(
            _device: &mut dyn GraphicsDevice,
            assets: &LoadedAssets,
            _config: &AppConfig,
        ) -> Result<Self, RenderError> {
            if assets.text("fail").is_some() {
                return Err(RenderError::Upload("forced failure".into()));
            }
            Ok(Self { updates: 0, last_dt: -1.0, last_size: (0, 0), keys_seen: 0 })
        }

        fn update(&mut self, frame: &FrameContext, input: &InputQueue) {
            self.updates += 1;
            self.last_dt = frame.dt;
            self.last_size = (frame.width, frame.height);
            self.keys_seen += input.iter().filter(|e| matches!(e, InputEvent::KeyDown { .. })).count();
        }

        fn render(&self, device: &mut dyn GraphicsDevice, frame: &FrameContext) {
            device.set_viewport(frame.width, frame.height);
        }
    }

    fn runner() -> AppRunner<Tally, RecordingDevice> {
        AppRunner::new(RecordingDevice::new(), AppConfig::default(), 800, 600)
    }

    #[test]
    fn frames_before_build_do_nothing() {
        let mut r = runner();
        r.frame(0.0);
        r.frame(16.0);
        assert!(!r.is_running());
        assert!(r.device().commands.is_empty());
    }

    #[test]
    fn frame_updates_then_renders() {
        let mut r = runner();
        r.build(&LoadedAssets::new());
        r.frame(1000.0);
        r.frame(1500.0);
        let app = r.app().unwrap();
        assert_eq!(app.updates, 2);
        assert!((app.last_dt - 0.5).abs() < 1e-6);
        assert_eq!(
            r.device().commands,
            vec![
                DeviceCommand::Viewport { width: 800, height: 600 },
                DeviceCommand::Viewport { width: 800, height: 600 },
            ]
        );
    }

    #[test]
    fn input_is_seen_once() {
        let mut r = runner();
        r.build(&LoadedAssets::new());
        r.push_input(InputEvent::KeyDown { key_code: 67 });
        r.frame(0.0);
        r.frame(16.0);
        assert_eq!(r.app().unwrap().keys_seen, 1);
    }

    #[test]
    fn resize_applies_to_next_frame() {
        let mut r = runner();
        r.build(&LoadedAssets::new());
        r.push_input(InputEvent::Resize { width: 320, height: 200 });
        r.frame(0.0);
        assert_eq!(r.app().unwrap().last_size, (320, 200));
    }

    #[test]
    fn failed_build_stops_rendering() {
        let mut r = runner();
        let mut assets = LoadedAssets::new();
        assets.insert_text("fail", String::new());
        r.build(&assets);
        r.frame(0.0);
        assert!(!r.is_running());
        assert!(r.device().commands.is_empty());
    }
}
