//! The scene aggregate: rotation accumulator, camera, programs and every
//! drawable slot, advanced and drawn once per frame.

use glam::{Mat4, Vec2, Vec3};
use log::{info, warn};
use orrery_engine::math::{perspective_deg, translation_of};
use orrery_engine::{
    AppConfig, BlendMode, FrameContext, Geometry, GraphicsDevice, LoadedAssets, MeshData,
    OrbitCamera, RenderError, ShaderKind, ShaderProgram, ShaderSet, ShaderSources, TextureId,
};

use crate::bodies::{self, BodyRegistry, OrbitingBody};
use crate::orbit;
use crate::skybox::SkyFace;

/// Asset key of the sphere mesh every body uses.
pub const SPHERE_MESH: &str = "sphere";

/// Scene tuning. Defaults reproduce the reference view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Accumulator degrees per second; the accumulator decreases.
    pub rotation_rate: f32,
    /// Key code that toggles the earth-following camera (`C`).
    pub camera_toggle_key: u32,
    pub light_position: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rotation_rate: 75.0,
            camera_toggle_key: 67,
            light_position: Vec3::ZERO,
        }
    }
}

/// A world matrix plus the geometry drawn with it, if it could be built.
#[derive(Debug, Clone)]
pub struct Slot {
    world_matrix: Mat4,
    geometry: Option<Geometry>,
}

impl Slot {
    fn new(geometry: Option<Geometry>) -> Self {
        let world_matrix = geometry
            .as_ref()
            .map_or(Mat4::IDENTITY, |g| g.world_matrix);
        Self { world_matrix, geometry }
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn is_drawable(&self) -> bool {
        self.geometry.is_some()
    }

    fn set_world_matrix(&mut self, world: Mat4) {
        self.world_matrix = world;
        if let Some(geometry) = &mut self.geometry {
            geometry.world_matrix = world;
        }
    }

    /// Skipped when the geometry or the program is missing.
    fn render(
        &self,
        device: &mut dyn GraphicsDevice,
        camera: &OrbitCamera,
        projection: &Mat4,
        program: Option<&ShaderProgram>,
    ) {
        if let (Some(geometry), Some(program)) = (&self.geometry, program) {
            geometry.render(device, camera, projection, Some(program));
        }
    }
}

pub struct Scene {
    registry: BodyRegistry,
    config: SceneConfig,
    clear_color: [f32; 4],
    field_of_view_deg: f32,
    near: f32,
    far: f32,

    /// Drives every orbit and spin angle.
    rotation: f32,
    earth_camera_mode: bool,
    camera: OrbitCamera,
    shaders: ShaderSet,

    skybox: Vec<Slot>,
    planets: Vec<Slot>,
    sun: Slot,
    moon: Slot,
    atmosphere: Slot,
}

impl Scene {
    /// Compile programs and upload geometry. Missing assets and failed
    /// programs are logged; the affected slots stay empty.
    pub fn build(
        device: &mut dyn GraphicsDevice,
        assets: &LoadedAssets,
        app: &AppConfig,
        config: SceneConfig,
        registry: BodyRegistry,
    ) -> Result<Self, RenderError> {
        registry.validate()?;

        let shaders = ShaderSet::build(
            device,
            sources(assets, "phong_vs", "phong_fs"),
            sources(assets, "flat_color_vs", "flat_color_fs"),
            sources(assets, "unlit_vs", "unlit_fs"),
        );
        let phong = shaders.get(ShaderKind::Phong);
        let unlit = shaders.get(ShaderKind::UnlitTextured);

        let sphere = match assets.mesh(SPHERE_MESH) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                warn!("{}: bodies will not be drawn", e);
                None
            }
        };
        let quad = MeshData::quad();

        let skybox = SkyFace::ALL
            .iter()
            .map(|face| {
                let mut slot = Slot::new(make_geometry(
                    device,
                    face.texture_key(),
                    Some(&quad),
                    assets.texture(face.texture_key()),
                    unlit,
                ));
                slot.set_world_matrix(face.world_matrix());
                slot
            })
            .collect();

        let mut body_slot = |body: &OrbitingBody| {
            Slot::new(make_geometry(
                device,
                body.name,
                sphere.as_ref(),
                assets.texture(body.texture),
                phong,
            ))
        };
        let planets: Vec<Slot> = registry.planets().iter().map(&mut body_slot).collect();
        let moon = body_slot(registry.moon());

        let sun = Slot::new(make_geometry(
            device,
            "Sun",
            sphere.as_ref(),
            assets.texture(bodies::SUN_TEXTURE),
            unlit,
        ));
        let atmosphere = Slot::new(
            make_geometry(
                device,
                "Atmosphere",
                sphere.as_ref(),
                assets.texture(bodies::ATMOSPHERE_TEXTURE),
                phong,
            )
            .map(|g| g.with_alpha(bodies::ATMOSPHERE_ALPHA)),
        );

        let drawable = planets.iter().filter(|s| s.is_drawable()).count();
        info!(
            "scene built: {}/{} planets drawable, skybox {}",
            drawable,
            planets.len(),
            if unlit.is_some() { "on" } else { "off" }
        );

        let mut scene = Self {
            registry,
            config,
            clear_color: app.clear_color,
            field_of_view_deg: app.field_of_view_deg,
            near: app.near,
            far: app.far,
            rotation: 0.0,
            earth_camera_mode: false,
            camera: OrbitCamera::new().with_smoothing(app.camera_smoothing),
            shaders,
            skybox,
            planets,
            sun,
            moon,
            atmosphere,
        };
        scene.place_bodies();
        Ok(scene)
    }

    /// Advance the accumulator, place every body, then retarget the camera.
    pub fn update(&mut self, dt: f32) {
        self.rotation -= dt * self.config.rotation_rate;
        self.place_bodies();
        let target = if self.earth_camera_mode {
            self.earth_position()
        } else {
            Vec3::ZERO
        };
        self.camera.update(dt, target);
    }

    fn place_bodies(&mut self) {
        let rotation = self.rotation;
        for (slot, body) in self.planets.iter_mut().zip(self.registry.planets()) {
            slot.set_world_matrix(orbit::planet_matrix(body, rotation));
        }
        self.sun.set_world_matrix(orbit::sun_matrix(rotation));

        // Earth is placed above; the moon and the shell follow it this frame.
        let parent = self.planets[self.registry.moon_parent()].world_matrix();
        self.moon.set_world_matrix(orbit::moon_matrix(
            self.registry.moon(),
            translation_of(&parent),
            rotation,
        ));
        self.atmosphere
            .set_world_matrix(orbit::atmosphere_matrix(&parent, rotation));
    }

    /// Clear, set the shared lighting uniforms, then draw opaque bodies
    /// followed by the blended atmosphere.
    pub fn render(&self, device: &mut dyn GraphicsDevice, frame: &FrameContext) {
        device.set_viewport(frame.width, frame.height);
        device.clear(self.clear_color);

        if let Some(phong) = &self.shaders.phong {
            device.use_program(phong.program);
            if let Some(loc) = phong.uniforms.light_position {
                device.set_uniform_vec3(loc, self.config.light_position);
            }
            if let Some(loc) = phong.uniforms.camera_position {
                device.set_uniform_vec3(loc, self.camera.position());
            }
        }
        let projection = perspective_deg(self.field_of_view_deg, frame.aspect(), self.near, self.far);
        let phong = self.shaders.get(ShaderKind::Phong);
        let unlit = self.shaders.get(ShaderKind::UnlitTextured);
        let camera = &self.camera;

        for face in &self.skybox {
            face.render(device, camera, &projection, unlit.as_ref());
        }
        for planet in &self.planets {
            planet.render(device, camera, &projection, phong.as_ref());
        }
        self.sun.render(device, camera, &projection, unlit.as_ref());
        self.moon.render(device, camera, &projection, phong.as_ref());

        device.set_blend(Some(BlendMode::Alpha));
        self.atmosphere.render(device, camera, &projection, phong.as_ref());
        device.set_blend(None);
    }

    pub fn toggle_earth_camera(&mut self) {
        self.earth_camera_mode = !self.earth_camera_mode;
        info!(
            "camera target: {}",
            if self.earth_camera_mode { "earth" } else { "origin" }
        );
    }

    /// Translation of the moon's parent as of the last update.
    pub fn earth_position(&self) -> Vec3 {
        translation_of(&self.planets[self.registry.moon_parent()].world_matrix())
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.camera.pointer_down(pos);
    }

    pub fn pointer_up(&mut self) {
        self.camera.pointer_up();
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.camera.pointer_move(pos);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn earth_camera_mode(&self) -> bool {
        self.earth_camera_mode
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn shaders(&self) -> &ShaderSet {
        &self.shaders
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn planet(&self, index: usize) -> Option<&Slot> {
        self.planets.get(index)
    }

    pub fn sun(&self) -> &Slot {
        &self.sun
    }

    pub fn moon(&self) -> &Slot {
        &self.moon
    }

    pub fn atmosphere(&self) -> &Slot {
        &self.atmosphere
    }

    pub fn skybox(&self) -> &[Slot] {
        &self.skybox
    }
}

fn sources<'a>(assets: &'a LoadedAssets, vertex: &str, fragment: &str) -> ShaderSources<'a> {
    ShaderSources {
        vertex: assets.text(vertex),
        fragment: assets.text(fragment),
    }
}

fn make_geometry(
    device: &mut dyn GraphicsDevice,
    label: &str,
    mesh: Option<&MeshData>,
    texture: Option<TextureId>,
    program: Option<ShaderProgram>,
) -> Option<Geometry> {
    let (mesh, program) = (mesh?, program?);
    if texture.is_none() {
        warn!("{}: no texture loaded", label);
    }
    match Geometry::create(device, mesh, texture, program) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            warn!("{}: {}", label, e);
            None
        }
    }
}
