/// Per-frame world matrices for the orbiting bodies. Pure math, no device state.
///
/// Angles are in degrees: the rotation accumulator times a body's speed.
/// Every chain reads right to left: scale first, translate last.

use glam::{Mat4, Vec3};
use orrery_engine::math::{rotation_y_deg, scale_uniform, translation, translation_vec};

use crate::bodies::{self, OrbitingBody};

/// `RotY(orbit) * T(distance, h, 0) * RotY(spin) * S(size)`.
pub fn planet_matrix(body: &OrbitingBody, rotation: f32) -> Mat4 {
    rotation_y_deg(rotation * body.orbit_speed)
        * translation(body.distance, bodies::ORBIT_HEIGHT, 0.0)
        * rotation_y_deg(rotation * body.rotation_speed)
        * scale_uniform(body.size)
}

/// Small, raised above the origin, spinning slowly on its own clock.
pub fn sun_matrix(rotation: f32) -> Mat4 {
    translation(0.0, bodies::ORBIT_HEIGHT, 0.0)
        * scale_uniform(bodies::SUN_SCALE)
        * rotation_y_deg(rotation * bodies::SUN_SPIN)
}

/// Where the moon sits relative to its parent's center.
pub fn moon_offset(moon: &OrbitingBody, rotation: f32) -> Vec3 {
    rotation_y_deg(rotation * moon.orbit_speed).transform_vector3(Vec3::new(moon.distance, 0.0, 0.0))
}

/// Orbit around `parent_position`, which must be this frame's parent translation.
pub fn moon_matrix(moon: &OrbitingBody, parent_position: Vec3, rotation: f32) -> Mat4 {
    translation_vec(parent_position)
        * rotation_y_deg(rotation * moon.orbit_speed)
        * translation(moon.distance, 0.0, 0.0)
        * scale_uniform(moon.size)
        * rotation_y_deg(rotation * moon.rotation_speed)
}

/// Earth's matrix, enlarged slightly and given its own spin.
pub fn atmosphere_matrix(earth: &Mat4, rotation: f32) -> Mat4 {
    *earth * scale_uniform(bodies::ATMOSPHERE_SCALE) * rotation_y_deg(rotation * bodies::ATMOSPHERE_SPIN)
}
