/// The six faces of the background cube. Matrices are fixed at build time.

use glam::Mat4;
use orrery_engine::math::{rotation_x_deg, rotation_y_deg, scale_uniform, translation};

/// Edge length of the skybox cube.
pub const SKYBOX_SCALE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyFace {
    NegY,
    PosY,
    NegX,
    PosX,
    NegZ,
    PosZ,
}

impl SkyFace {
    /// Build and draw order.
    pub const ALL: [SkyFace; 6] = [
        SkyFace::NegY,
        SkyFace::PosY,
        SkyFace::NegX,
        SkyFace::PosX,
        SkyFace::NegZ,
        SkyFace::PosZ,
    ];

    /// Asset key of the face image.
    pub fn texture_key(self) -> &'static str {
        match self {
            SkyFace::NegY => "sky_neg_y",
            SkyFace::PosY => "sky_pos_y",
            SkyFace::NegX => "sky_neg_x",
            SkyFace::PosX => "sky_pos_x",
            SkyFace::NegZ => "sky_neg_z",
            SkyFace::PosZ => "sky_pos_z",
        }
    }

    /// `T * R * S` placing the unit quad as this face, front side inward.
    pub fn world_matrix(self) -> Mat4 {
        let h = SKYBOX_SCALE / 2.0;
        let (t, r) = match self {
            SkyFace::NegY => (translation(0.0, -h, 0.0), rotation_x_deg(-90.0)),
            SkyFace::PosY => (translation(0.0, h, 0.0), rotation_x_deg(90.0)),
            SkyFace::NegX => (translation(-h, 0.0, 0.0), rotation_y_deg(90.0)),
            SkyFace::PosX => (translation(h, 0.0, 0.0), rotation_y_deg(-90.0)),
            SkyFace::NegZ => (translation(0.0, 0.0, -h), rotation_y_deg(0.0)),
            SkyFace::PosZ => (translation(0.0, 0.0, h), rotation_y_deg(180.0)),
        };
        t * r * scale_uniform(SKYBOX_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::math::translation_of;

    #[test]
    fn faces_enclose_the_origin() {
        for face in SkyFace::ALL {
            let m = face.world_matrix();
            let center = translation_of(&m);
            assert!((center.length() - 500.0).abs() < 1e-3, "{:?}", face);
            // Quad normal is +Z; it must point back at the origin.
            let normal = m.transform_vector3(Vec3::Z).normalize();
            assert!((normal + center.normalize()).length() < 1e-4, "{:?}", face);
        }
    }

    #[test]
    fn faces_span_the_cube() {
        for face in SkyFace::ALL {
            let m = face.world_matrix();
            let corner = m.transform_point3(Vec3::new(0.5, 0.5, 0.0));
            for axis in [corner.x, corner.y, corner.z] {
                assert!((axis.abs() - 500.0).abs() < 1e-2, "{:?}: {:?}", face, corner);
            }
        }
    }

    #[test]
    fn texture_keys_are_distinct() {
        let mut keys: Vec<_> = SkyFace::ALL.iter().map(|f| f.texture_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }
}
