use deskscene_common::ViewMode;
use glam::Mat4;
use serde::Serialize;

pub const PERSPECTIVE_NEAR: f32 = 0.1;
pub const PERSPECTIVE_FAR: f32 = 1000.0;
pub const ORTHO_NEAR: f32 = 0.1;
pub const ORTHO_FAR: f32 = 100.0;

/// Width over height of the framebuffer. A zero height counts as one pixel.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Projection parameters for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub mode: ViewMode,
    /// Vertical field of view in degrees; ignored in orthographic mode.
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn new(mode: ViewMode, fov_degrees: f32, width: u32, height: u32) -> Self {
        Self {
            mode,
            fov_degrees,
            aspect: aspect_ratio(width, height),
        }
    }

    /// Clip-space matrix with a `0..1` depth range.
    pub fn matrix(&self) -> Mat4 {
        match self.mode {
            ViewMode::Perspective => Mat4::perspective_rh(
                self.fov_degrees.to_radians(),
                self.aspect,
                PERSPECTIVE_NEAR,
                PERSPECTIVE_FAR,
            ),
            ViewMode::Orthographic => Mat4::orthographic_rh(
                -self.aspect,
                self.aspect,
                -1.0,
                1.0,
                ORTHO_NEAR,
                ORTHO_FAR,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_aspect(m: Mat4) -> f32 {
        m.col(1).y / m.col(0).x
    }

    #[test]
    fn aspect_tracks_resize() {
        let before = Projection::new(ViewMode::Perspective, 45.0, 800, 600);
        assert_eq!(before.aspect, 800.0 / 600.0);

        let after = Projection::new(ViewMode::Perspective, 45.0, 1600, 900);
        assert_eq!(after.aspect, 16.0 / 9.0);
        assert!((matrix_aspect(after.matrix()) - 16.0 / 9.0).abs() < 1e-5);

        let ortho = Projection::new(ViewMode::Orthographic, 45.0, 1600, 900);
        assert!((matrix_aspect(ortho.matrix()) - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        assert_eq!(aspect_ratio(640, 0), 640.0);
    }

    #[test]
    fn toggling_twice_restores_perspective() {
        let p = Projection::new(ViewMode::Perspective, 45.0, 800, 600);
        let mut mode = p.mode;
        mode = mode.toggled();
        let ortho = Projection { mode, ..p };
        assert_ne!(ortho.matrix(), p.matrix());
        mode = mode.toggled();
        let back = Projection { mode, ..p };
        assert_eq!(back, p);
        assert_eq!(back.matrix(), p.matrix());
    }

    #[test]
    fn perspective_uses_fov() {
        let p = Projection::new(ViewMode::Perspective, 90.0, 100, 100);
        // cot(45 deg) == 1
        assert!((p.matrix().col(1).y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthographic_spans_aspect_by_unit_height() {
        let p = Projection::new(ViewMode::Orthographic, 45.0, 200, 100);
        let m = p.matrix();
        let corner = m.project_point3(glam::Vec3::new(2.0, 1.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }
}
