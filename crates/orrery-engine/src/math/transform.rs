//! Affine transform helpers on top of glam.
//!
//! Composition is always `A * B` with column vectors: `T * R * S` applied to a
//! point scales first, then rotates, then translates. Rotation helpers take
//! degrees because scene setup code is written in degrees.

use glam::{Mat4, Vec3, Vec4};

#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

#[inline]
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

#[inline]
pub fn translation_vec(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Rotation about the X axis, in degrees.
#[inline]
pub fn rotation_x_deg(degrees: f32) -> Mat4 {
    Mat4::from_rotation_x(degrees.to_radians())
}

/// Rotation about the Y (vertical) axis, in degrees.
#[inline]
pub fn rotation_y_deg(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Rotation about the Z axis, in degrees.
#[inline]
pub fn rotation_z_deg(degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(degrees.to_radians())
}

#[inline]
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

#[inline]
pub fn scale_uniform(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(s))
}

/// Read the element at `(row, col)`. glam stores columns, so this indexes `col` first.
#[inline]
pub fn element(m: &Mat4, row: usize, col: usize) -> f32 {
    m.col(col)[row]
}

/// Translation column as a 3D position.
#[inline]
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

/// Translation column as a homogeneous point (`w = 1`).
#[inline]
pub fn translation_point(m: &Mat4) -> Vec4 {
    m.w_axis.truncate().extend(1.0)
}

/// Perspective projection for WebGL clip space (z in [-1, 1]).
/// `fov_y_deg` is the vertical field of view in degrees.
pub fn perspective_deg(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    Mat4::perspective_rh_gl(fov_y_deg.to_radians(), aspect, near, far)
}

/// Element-wise comparison within `eps`.
#[inline]
pub fn approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
    a.abs_diff_eq(*b, eps)
}
