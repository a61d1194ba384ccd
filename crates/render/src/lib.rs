//! Rendering Adapter: camera, projection and draw-list composition.
//!
//! # Invariants
//! - Composition never mutates the scene.
//! - Draw order is plane, wedge rings, box, lamp; backends replay it as given.
//! - Aspect ratio is taken from the framebuffer size passed for each frame.

mod camera;
mod frame;
mod projection;
mod renderer;

pub use camera::FlyCamera;
pub use frame::{DrawCommand, Frame, Pipeline};
pub use projection::{
    ORTHO_FAR, ORTHO_NEAR, PERSPECTIVE_FAR, PERSPECTIVE_NEAR, Projection, aspect_ratio,
};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "deskscene-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
