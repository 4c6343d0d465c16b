/// The orbiting bodies: eight planets and Earth's moon.
///
/// Speeds are per degree of the scene's rotation accumulator; sizes scale the
/// unit sphere mesh. Values are hand-tuned for the view, not physical.

use orrery_engine::RenderError;
use thiserror::Error;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

/// Names for logs (indexed by planet constant).
pub const PLANET_NAMES: [&str; PLANET_COUNT] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

// ── Shared orbit plane ───────────────────────────────────────────────

/// Height of the orbit plane above the origin.
pub const ORBIT_HEIGHT: f32 = 1.5;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_SCALE: f32 = 0.03;
pub const SUN_SPIN: f32 = 0.05;
pub const SUN_TEXTURE: &str = "sun";

// ── Earth's atmosphere shell ─────────────────────────────────────────

pub const ATMOSPHERE_SCALE: f32 = 1.1;
pub const ATMOSPHERE_SPIN: f32 = 0.2;
pub const ATMOSPHERE_ALPHA: f32 = 0.5;
pub const ATMOSPHERE_TEXTURE: &str = "clouds";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("body '{name}' has size {size}, must be positive")]
    NonPositiveSize { name: &'static str, size: f32 },

    #[error("body '{name}' has distance {distance}, must not be negative")]
    NegativeDistance { name: &'static str, distance: f32 },

    #[error("moon parent index {index} is outside {count} planets")]
    UnknownParent { index: usize, count: usize },
}

impl From<BodyError> for RenderError {
    fn from(e: BodyError) -> Self {
        RenderError::InvalidScene(e.to_string())
    }
}

/// One body's fixed parameters. Its world matrix lives on the scene, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    pub name: &'static str,
    /// Uniform scale applied to the unit sphere.
    pub size: f32,
    /// Self-rotation per degree of accumulator.
    pub rotation_speed: f32,
    /// Orbit radius around the origin (or around the parent, for a moon).
    pub distance: f32,
    /// Asset key of the surface texture.
    pub texture: &'static str,
    /// Orbit angle per degree of accumulator.
    pub orbit_speed: f32,
}

impl OrbitingBody {
    pub const fn new(
        name: &'static str,
        size: f32,
        rotation_speed: f32,
        distance: f32,
        texture: &'static str,
        orbit_speed: f32,
    ) -> Self {
        Self { name, size, rotation_speed, distance, texture, orbit_speed }
    }

    /// `size > 0` and `distance >= 0`. NaN fails both.
    pub fn validate(&self) -> Result<(), BodyError> {
        if !(self.size > 0.0) {
            return Err(BodyError::NonPositiveSize { name: self.name, size: self.size });
        }
        if !(self.distance >= 0.0) {
            return Err(BodyError::NegativeDistance { name: self.name, distance: self.distance });
        }
        Ok(())
    }
}

pub const PLANETS: [OrbitingBody; PLANET_COUNT] = [
    OrbitingBody::new("Mercury", 2.0, 1.0, 3.0, "mercury", 0.005),
    OrbitingBody::new("Venus", 1.5, 2.0, 4.0, "venus", 0.008),
    OrbitingBody::new("Earth", 1.0, 1.0, 6.0, "earth", 0.01),
    OrbitingBody::new("Mars", 0.7, 2.2, 8.0, "mars", 0.007),
    OrbitingBody::new("Jupiter", 0.5, 0.9, 12.0, "jupiter", 0.03),
    OrbitingBody::new("Saturn", 0.3, 1.2, 16.0, "saturn", 0.015),
    OrbitingBody::new("Uranus", 0.2, 1.3, 18.0, "uranus", 0.016),
    OrbitingBody::new("Neptune", 0.1, 1.1, 21.0, "neptune", 0.0165),
];

pub const MOON: OrbitingBody = OrbitingBody::new("Moon", 3.0, 1.5, 1.0, "moon", 0.005);

/// Planets plus one moon orbiting the planet at `moon_parent`.
/// Built once; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRegistry {
    planets: Vec<OrbitingBody>,
    moon: OrbitingBody,
    moon_parent: usize,
}

impl BodyRegistry {
    /// Validate every body and the moon's parent index.
    pub fn new(
        planets: Vec<OrbitingBody>,
        moon: OrbitingBody,
        moon_parent: usize,
    ) -> Result<Self, BodyError> {
        let registry = Self { planets, moon, moon_parent };
        registry.validate()?;
        Ok(registry)
    }

    /// The reference solar system: Mercury to Neptune, with the Moon around Earth.
    pub fn solar_system() -> Result<Self, BodyError> {
        Self::new(PLANETS.to_vec(), MOON, EARTH)
    }

    pub fn validate(&self) -> Result<(), BodyError> {
        for body in self.planets.iter().chain(std::iter::once(&self.moon)) {
            body.validate()?;
        }
        if self.moon_parent >= self.planets.len() {
            return Err(BodyError::UnknownParent {
                index: self.moon_parent,
                count: self.planets.len(),
            });
        }
        Ok(())
    }

    pub fn planets(&self) -> &[OrbitingBody] {
        &self.planets
    }

    pub fn moon(&self) -> &OrbitingBody {
        &self.moon
    }

    /// Index of the planet the moon orbits.
    pub fn moon_parent(&self) -> usize {
        self.moon_parent
    }

    pub fn by_name(&self, name: &str) -> Option<&OrbitingBody> {
        self.planets
            .iter()
            .chain(std::iter::once(&self.moon))
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.planets.len() + 1
    }
}
