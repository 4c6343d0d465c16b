use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

/// Pointer interaction state for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No pointer held.
    Idle,
    /// Pointer held; `last` is the previous pointer position in canvas pixels.
    Dragging { last: Vec2 },
}

/// Orbit camera: the eye sits on a sphere around a target point.
///
/// Drag input accumulates as pending angular motion which `update` applies
/// with exponential damping; wheel input changes the distance immediately.
/// The view matrix and eye position are rebuilt only in `update`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rotation around the vertical axis (radians).
    azimuth: f32,
    /// Angle above the horizontal plane (radians), strictly inside (-90°, 90°).
    elevation: f32,
    /// Distance from the target point.
    distance: f32,
    target: Vec3,
    /// Damping factor (0.0 = apply drag instantly, 0.9 = long glide).
    smoothing: f32,
    /// Angular motion not yet applied: (azimuth, elevation) in radians.
    pending: Vec2,
    drag: DragState,
    eye: Vec3,
    view: Mat4,
}

impl OrbitCamera {
    pub const ORBIT_SENSITIVITY: f32 = 0.008;
    pub const ZOOM_SPEED: f32 = 0.1;
    pub const MIN_DISTANCE: f32 = 2.0;
    pub const MAX_DISTANCE: f32 = 400.0;
    /// 89 degrees.
    pub const MAX_ELEVATION: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub const DEFAULT_AZIMUTH: f32 = 0.0;
    pub const DEFAULT_ELEVATION: f32 = 0.35;
    pub const DEFAULT_DISTANCE: f32 = 40.0;

    pub fn new() -> Self {
        let mut camera = Self {
            azimuth: Self::DEFAULT_AZIMUTH,
            elevation: Self::DEFAULT_ELEVATION,
            distance: Self::DEFAULT_DISTANCE,
            target: Vec3::ZERO,
            smoothing: 0.0,
            pending: Vec2::ZERO,
            drag: DragState::Idle,
            eye: Vec3::ZERO,
            view: Mat4::IDENTITY,
        };
        camera.rebuild();
        camera
    }

    /// Builder-style damping setup.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.set_smoothing(smoothing);
        self
    }

    /// 0.0 = instant, 0.9 = very smooth.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.drag = DragState::Dragging { last: pos };
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Feed a pointer position. Only has an effect while dragging.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if let DragState::Dragging { last } = self.drag {
            let delta = pos - last;
            self.orbit(delta.x, delta.y);
            self.drag = DragState::Dragging { last: pos };
        }
    }

    /// Queue an orbit by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.pending.x -= dx * Self::ORBIT_SENSITIVITY;
        self.pending.y += dy * Self::ORBIT_SENSITIVITY;
    }

    /// Zoom by wheel delta (positive = closer). Independent of drag state.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * Self::ZOOM_SPEED;
        self.distance = self.distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    /// Apply damped input, retarget, and rebuild the eye position and view matrix.
    pub fn update(&mut self, dt: f32, target: Vec3) {
        let step = if self.smoothing <= 0.0 {
            1.0
        } else {
            1.0 - self.smoothing.powf(dt * 60.0)
        };
        let applied = self.pending * step;
        self.pending -= applied;
        if self.pending.length_squared() < 1e-12 {
            self.pending = Vec2::ZERO;
        }

        self.azimuth = (self.azimuth + applied.x).rem_euclid(TAU);
        let elevation = self.elevation + applied.y;
        self.elevation = elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        if self.elevation != elevation {
            // Pinned at a pole; drop the rest of the vertical motion.
            self.pending.y = 0.0;
        }

        self.target = target;
        self.rebuild();
    }

    /// Restore the default orientation and distance. The target is kept.
    pub fn reset(&mut self) {
        self.azimuth = Self::DEFAULT_AZIMUTH;
        self.elevation = Self::DEFAULT_ELEVATION;
        self.distance = Self::DEFAULT_DISTANCE;
        self.pending = Vec2::ZERO;
        self.drag = DragState::Idle;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let offset = Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance;
        self.eye = self.target + offset;
        self.view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.eye
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn level_camera() -> OrbitCamera {
        let mut cam = OrbitCamera::new();
        cam.elevation = 0.0;
        cam.azimuth = 0.0;
        cam.distance = 10.0;
        cam.update(0.0, Vec3::ZERO);
        cam
    }

    #[test]
    fn eye_sits_on_plus_z_at_zero_angles() {
        let cam = level_camera();
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));
    }

    #[test]
    fn eye_is_offset_from_target() {
        let mut cam = level_camera();
        let target = Vec3::new(5.0, 1.5, -2.0);
        cam.update(0.016, target);
        assert!(((cam.position() - target).length() - 10.0).abs() < 1e-4);
        assert_eq!(cam.target(), target);
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let mut cam = OrbitCamera::new();
        cam.update(0.016, Vec3::new(3.0, 0.0, 3.0));
        let p = cam.view_matrix().transform_point3(Vec3::new(3.0, 0.0, 3.0));
        assert!(p.x.abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!((p.z + cam.distance()).abs() < 1e-3);
    }

    #[test]
    fn moves_ignored_while_idle() {
        let mut cam = level_camera();
        cam.pointer_move(Vec2::new(100.0, 100.0));
        cam.pointer_move(Vec2::new(300.0, 50.0));
        cam.update(0.016, Vec3::ZERO);
        assert_eq!(cam.azimuth(), 0.0);
        assert_eq!(cam.elevation(), 0.0);
    }

    #[test]
    fn drag_state_machine() {
        let mut cam = level_camera();
        assert!(!cam.is_dragging());
        cam.pointer_down(Vec2::new(10.0, 10.0));
        assert!(cam.is_dragging());
        cam.pointer_move(Vec2::new(20.0, 10.0));
        assert_eq!(cam.drag_state(), DragState::Dragging { last: Vec2::new(20.0, 10.0) });
        cam.pointer_up();
        assert_eq!(cam.drag_state(), DragState::Idle);
        cam.update(0.016, Vec3::ZERO);
        assert!(cam.azimuth() != 0.0);
    }

    #[test]
    fn elevation_never_reaches_poles() {
        let mut cam = level_camera();
        cam.pointer_down(Vec2::ZERO);
        for i in 1..50 {
            cam.pointer_move(Vec2::new(0.0, i as f32 * 500.0));
            cam.update(0.016, Vec3::ZERO);
            assert!(cam.elevation() < FRAC_PI_2);
        }
        assert!((cam.elevation() - OrbitCamera::MAX_ELEVATION).abs() < 1e-6);

        for i in 1..50 {
            cam.pointer_move(Vec2::new(0.0, -(i as f32) * 5000.0));
            cam.update(0.016, Vec3::ZERO);
            assert!(cam.elevation() > -FRAC_PI_2);
        }
        assert!(cam.position().is_finite());
    }

    #[test]
    fn zoom_clamps_and_ignores_drag_state() {
        let mut cam = OrbitCamera::new();
        cam.zoom(100.0);
        assert_eq!(cam.distance(), OrbitCamera::MIN_DISTANCE);
        cam.pointer_down(Vec2::ZERO);
        for _ in 0..200 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.distance(), OrbitCamera::MAX_DISTANCE);
    }

    #[test]
    fn smoothing_spreads_motion_over_frames() {
        let mut cam = level_camera();
        cam.set_smoothing(0.9);
        cam.orbit(-100.0, 0.0);
        cam.update(1.0 / 60.0, Vec3::ZERO);
        let first = cam.azimuth();
        let total = 100.0 * OrbitCamera::ORBIT_SENSITIVITY;
        assert!(first > 0.0 && first < total);
        for _ in 0..600 {
            cam.update(1.0 / 60.0, Vec3::ZERO);
        }
        assert!((cam.azimuth() - total).abs() < 1e-4);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut cam = OrbitCamera::new();
        cam.zoom(2.0);
        cam.orbit(50.0, 50.0);
        cam.update(0.016, Vec3::ONE);
        cam.reset();
        assert_eq!(cam.distance(), OrbitCamera::DEFAULT_DISTANCE);
        assert_eq!(cam.elevation(), OrbitCamera::DEFAULT_ELEVATION);
        assert_eq!(cam.target(), Vec3::ONE);
    }
}
