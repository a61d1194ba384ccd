use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Interleaved mesh vertex: position, normal, texture coordinate.
///
/// Stride is 8 floats (3 + 3 + 2).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const FLOATS: usize = 8;

    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Spatial transform: position, rotation, scale.
///
/// Composes as `translate * rotate * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Projection selection, toggled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Perspective => ViewMode::Orthographic,
            ViewMode::Orthographic => ViewMode::Perspective,
        }
    }
}

/// Direction of a keyboard-driven camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// One of the seven textures the scene binds, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureSlot {
    Brick,
    Wood,
    BatteryBody,
    ChromeCap,
    BoxTop,
    TapeTop,
    TapeSide,
}

impl TextureSlot {
    pub const COUNT: usize = 7;

    pub const ALL: [TextureSlot; Self::COUNT] = [
        TextureSlot::Brick,
        TextureSlot::Wood,
        TextureSlot::BatteryBody,
        TextureSlot::ChromeCap,
        TextureSlot::BoxTop,
        TextureSlot::TapeTop,
        TextureSlot::TapeSide,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::Brick => "brick",
            TextureSlot::Wood => "wood",
            TextureSlot::BatteryBody => "battery body",
            TextureSlot::ChromeCap => "chrome cap",
            TextureSlot::BoxTop => "box top",
            TextureSlot::TapeTop => "tape top",
            TextureSlot::TapeSide => "tape side",
        }
    }
}
