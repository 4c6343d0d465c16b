pub mod transform;

pub use glam::{Mat4, Vec2, Vec3, Vec4};
pub use transform::{
    approx_eq, element, identity, perspective_deg, rotation_x_deg, rotation_y_deg,
    rotation_z_deg, scale, scale_uniform, translation, translation_of, translation_point,
    translation_vec,
};
