//! wgpu backend for the desk scene.
//!
//! Replays a composed `Frame` with two programs: textured Phong for the
//! scene geometry and a flat white program for the lamp marker.
//!
//! # Invariants
//! - The renderer never mutates the scene or camera.
//! - Draws are issued in the frame's order, one instance each.
//! - Every texture slot is uploaded before the first frame.

mod context;
mod gpu;
mod shaders;
mod texture;

pub use context::GpuContext;
pub use gpu::WgpuRenderer;

/// Errors from GPU setup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("pipeline creation failed: {0}")]
    Pipeline(String),
    #[error("expected {expected} textures, got {actual}")]
    TextureCount { expected: usize, actual: usize },
    #[error("texture {name} is {width}x{height}, device limit is {max}")]
    TextureTooLarge {
        name: String,
        width: u32,
        height: u32,
        max: u32,
    },
}
