use deskscene_common::CameraMovement;
use glam::{Mat4, Vec3};

/// Free-fly camera driven by yaw/pitch in degrees.
///
/// `front`, `right` and `up` are recomputed whenever the orientation changes
/// and always form an orthonormal basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub speed: f32,
    pub sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// Pitch is left unclamped unless a limit (degrees) is set.
    pub pitch_limit: Option<f32>,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(7.0, 8.0, 15.0))
    }
}

impl FlyCamera {
    pub const YAW: f32 = -90.0;
    pub const PITCH: f32 = 0.0;
    pub const SPEED: f32 = 2.5;
    pub const SENSITIVITY: f32 = 0.1;
    pub const ZOOM: f32 = 45.0;

    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Self::YAW, Self::PITCH)
    }

    pub fn with_orientation(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut cam = Self {
            position,
            world_up: Vec3::Y,
            yaw,
            pitch,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            speed: Self::SPEED,
            sensitivity: Self::SENSITIVITY,
            zoom: Self::ZOOM,
            pitch_limit: None,
        };
        cam.update_basis();
        cam
    }

    pub fn with_pitch_limit(mut self, limit: Option<f32>) -> Self {
        self.pitch_limit = limit;
        self.apply_pitch_limit();
        self.update_basis();
        self
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.up * velocity,
            CameraMovement::Down => self.position -= self.up * velocity,
        }
    }

    /// `dy` is positive when the pointer moves up the screen.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        self.apply_pitch_limit();
        self.update_basis();
    }

    /// Scrolling changes movement speed, not zoom.
    pub fn process_scroll(&mut self, dy: f32) {
        self.speed += dy;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn apply_pitch_limit(&mut self) {
        if let Some(limit) = self.pitch_limit {
            self.pitch = self.pitch.clamp(-limit, limit);
        }
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        // Straight up or down the horizontal component vanishes; keep the last right.
        self.right = self
            .front
            .cross(self.world_up)
            .try_normalize()
            .unwrap_or(self.right);
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_orthonormal(cam: &FlyCamera) {
        for v in [cam.front, cam.right, cam.up] {
            assert!((v.length() - 1.0).abs() < EPS, "not unit: {v}");
        }
        assert!(cam.front.dot(cam.right).abs() < EPS);
        assert!(cam.front.dot(cam.up).abs() < EPS);
        assert!(cam.right.dot(cam.up).abs() < EPS);
    }

    #[test]
    fn default_camera() {
        let cam = FlyCamera::default();
        assert_eq!(cam.position, Vec3::new(7.0, 8.0, 15.0));
        assert!(cam.front.abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.up.abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.zoom, 45.0);
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn basis_stays_orthonormal_under_mouse_input() {
        let mut cam = FlyCamera::default();
        // deterministic pseudo-random walk, large enough to wrap yaw and cross the poles
        let mut seed = 0x2545_f491_u32;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let dx = (seed % 401) as f32 - 200.0;
            let dy = ((seed / 401) % 301) as f32 - 150.0;
            cam.process_mouse_movement(dx, dy);
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn view_matrix_at_origin_faces_positive_x() {
        let cam = FlyCamera::with_orientation(Vec3::ZERO, 0.0, 0.0);
        assert!(cam.front.abs_diff_eq(Vec3::X, EPS));

        let inv = cam.view_matrix().inverse();
        let forward = inv.transform_vector3(Vec3::NEG_Z);
        assert!(forward.abs_diff_eq(cam.front, EPS));
        assert!(inv.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn view_matrix_follows_yaw_and_pitch() {
        let cam = FlyCamera::with_orientation(Vec3::new(1.0, 2.0, 3.0), 30.0, -20.0);
        let inv = cam.view_matrix().inverse();
        assert!(inv.transform_vector3(Vec3::NEG_Z).abs_diff_eq(cam.front, EPS));
        assert!(inv.transform_vector3(Vec3::Y).abs_diff_eq(cam.up, EPS));
        assert!(
            inv.transform_point3(Vec3::ZERO)
                .abs_diff_eq(cam.position, EPS)
        );
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert!((cam.position - start).abs_diff_eq(cam.front * FlyCamera::SPEED, EPS));

        let start = cam.position;
        cam.process_keyboard(CameraMovement::Left, 0.5);
        assert!((cam.position - start).abs_diff_eq(-cam.right * 1.25, EPS));

        let start = cam.position;
        cam.process_keyboard(CameraMovement::Up, 2.0);
        assert!((cam.position - start).abs_diff_eq(cam.up * 5.0, EPS));

        cam.process_keyboard(CameraMovement::Down, 2.0);
        assert!(cam.position.abs_diff_eq(start, EPS));
    }

    #[test]
    fn scroll_changes_speed_not_zoom() {
        let mut cam = FlyCamera::default();
        cam.process_scroll(1.5);
        assert_eq!(cam.speed, FlyCamera::SPEED + 1.5);
        assert_eq!(cam.zoom, FlyCamera::ZOOM);
    }

    #[test]
    fn pitch_unclamped_by_default() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 1_200.0);
        assert!((cam.pitch - 120.0).abs() < EPS);
    }

    #[test]
    fn pitch_limit_clamps() {
        let mut cam = FlyCamera::default().with_pitch_limit(Some(89.0));
        cam.process_mouse_movement(0.0, 1_200.0);
        assert_eq!(cam.pitch, 89.0);
        cam.process_mouse_movement(0.0, -5_000.0);
        assert_eq!(cam.pitch, -89.0);
        assert_orthonormal(&cam);
    }
}
