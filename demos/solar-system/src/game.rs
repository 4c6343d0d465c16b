/// Solar system: textured planets on circular orbits around a small sun,
/// inside a galaxy skybox. Drag to orbit the camera, scroll to zoom,
/// `C` to follow Earth.

use glam::Vec2;
use orrery_engine::{
    App, AppConfig, AssetError, AssetManifest, FrameContext, GraphicsDevice, InputEvent,
    InputQueue, LoadedAssets, RenderError,
};

use crate::bodies::BodyRegistry;
use crate::scene::{Scene, SceneConfig};

const MANIFEST_JSON: &str = include_str!("../assets.json");

pub struct SolarSystem {
    scene: Scene,
}

impl SolarSystem {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Route this frame's events to the camera and the mode toggle.
    fn handle_input(&mut self, input: &InputQueue) {
        let toggle_key = self.scene.config().camera_toggle_key;
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.scene.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.scene.pointer_up(),
                InputEvent::PointerMove { x, y } => self.scene.pointer_move(Vec2::new(x, y)),
                InputEvent::Wheel { delta } => self.scene.zoom(delta),
                _ => {}
            }
        }
        if input.key_pressed(toggle_key) {
            self.scene.toggle_earth_camera();
        }
    }
}

impl App for SolarSystem {
    fn config() -> AppConfig {
        AppConfig {
            camera_smoothing: 0.85,
            ..AppConfig::default()
        }
    }

    fn manifest() -> Result<AssetManifest, AssetError> {
        AssetManifest::from_json(MANIFEST_JSON)
    }

    fn build(
        device: &mut dyn GraphicsDevice,
        assets: &LoadedAssets,
        config: &AppConfig,
    ) -> Result<Self, RenderError> {
        let registry = BodyRegistry::solar_system()?;
        let scene = Scene::build(device, assets, config, SceneConfig::default(), registry)?;
        Ok(Self::new(scene))
    }

    fn update(&mut self, frame: &FrameContext, input: &InputQueue) {
        self.handle_input(input);
        self.scene.update(frame.dt);
    }

    fn render(&self, device: &mut dyn GraphicsDevice, frame: &FrameContext) {
        self.scene.render(device, frame);
    }
}
