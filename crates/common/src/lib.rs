//! Shared types used by every deskscene crate.

mod types;

pub use types::{CameraMovement, TextureSlot, Transform, Vertex, ViewMode};
