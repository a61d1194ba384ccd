//! Placement table for the desk scene.
//!
//! Everything here is fixed at construction. The scene never animates.

use crate::geometry::MeshKind;
use deskscene_common::{TextureSlot, Transform};
use glam::{Quat, Vec3};
use serde::Serialize;

/// Rotation steps (degrees about local Y) that turn one wedge into a ring.
pub const WEDGE_STEPS_DEGREES: [f32; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// A cylinder-like object drawn as six rotated copies of the wedge mesh.
#[derive(Debug, Clone, Serialize)]
pub struct WedgeRing {
    pub name: &'static str,
    pub position: Vec3,
    pub scale: Vec3,
    pub tilt_degrees: f32,
    /// Not required to be unit length.
    pub tilt_axis: Vec3,
    pub texture: TextureSlot,
}

impl WedgeRing {
    pub fn tilt(&self) -> Quat {
        Quat::from_axis_angle(self.tilt_axis.normalize(), self.tilt_degrees.to_radians())
    }

    /// Transform for one wedge: `translate * tilt * step * scale`.
    pub fn step_transform(&self, step_degrees: f32) -> Transform {
        Transform {
            position: self.position,
            rotation: self.tilt() * Quat::from_rotation_y(step_degrees.to_radians()),
            scale: self.scale,
        }
    }

    pub fn step_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        WEDGE_STEPS_DEGREES
            .iter()
            .map(move |&step| self.step_transform(step))
    }
}

/// A single-draw textured object.
#[derive(Debug, Clone, Serialize)]
pub struct Prop {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub texture: TextureSlot,
    pub transform: Transform,
}

/// The point light and the constants of the lit program.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Lighting {
    pub light_color: Vec3,
    pub light_position: Vec3,
    /// Scale of the lamp marker drawn at the light position.
    pub light_scale: Vec3,
    /// Uploaded with the frame but not read by the textured path.
    pub object_color: Vec3,
    pub ambient_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            light_color: Vec3::new(0.90, 0.94, 0.97),
            light_position: Vec3::new(5.5, 12.5, 13.0),
            light_scale: Vec3::splat(3.3),
            object_color: Vec3::new(1.0, 0.2, 0.0),
            ambient_strength: 0.1,
            specular_strength: 0.8,
            shininess: 16.0,
        }
    }
}

impl Lighting {
    pub fn lamp_transform(&self) -> Transform {
        Transform {
            position: self.light_position,
            scale: self.light_scale,
            ..Transform::default()
        }
    }
}

/// The complete static scene.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub table: Prop,
    pub rings: Vec<WedgeRing>,
    pub boxed: Prop,
    pub lighting: Lighting,
}

impl Scene {
    /// The desk: table, battery, weight, tape roll, box and lamp.
    pub fn desk() -> Self {
        let battery_tilt = (-70.0, Vec3::new(1.0, 90.0, 0.5));
        let tape_tilt = (45.0, Vec3::new(0.1, 0.0, 0.2));

        let ring = |name, position, scale, (tilt_degrees, tilt_axis): (f32, Vec3), texture| {
            WedgeRing {
                name,
                position,
                scale,
                tilt_degrees,
                tilt_axis,
                texture,
            }
        };

        let rings = vec![
            ring(
                "battery large",
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.8, 1.0, 0.8),
                battery_tilt,
                TextureSlot::BatteryBody,
            ),
            ring(
                "battery small",
                Vec3::new(0.0, 0.2, 0.0),
                Vec3::splat(0.3),
                battery_tilt,
                TextureSlot::ChromeCap,
            ),
            ring(
                "weight large",
                Vec3::new(4.0, -1.5, 4.7),
                Vec3::new(2.0, 0.25, 2.0),
                battery_tilt,
                TextureSlot::ChromeCap,
            ),
            ring(
                "weight small",
                Vec3::new(4.0, -1.0, 4.7),
                Vec3::splat(0.5),
                battery_tilt,
                TextureSlot::ChromeCap,
            ),
            ring(
                "tape outer",
                Vec3::new(5.0, -0.21, 1.85),
                Vec3::new(1.9, 0.7, 1.9),
                tape_tilt,
                TextureSlot::TapeSide,
            ),
            ring(
                "tape inner",
                Vec3::new(5.0, -0.2, 1.85),
                Vec3::new(1.8, 0.7, 1.8),
                tape_tilt,
                TextureSlot::TapeTop,
            ),
        ];

        Self {
            table: Prop {
                name: "table",
                mesh: MeshKind::Plane,
                texture: TextureSlot::Wood,
                transform: Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)),
            },
            rings,
            boxed: Prop {
                name: "box",
                mesh: MeshKind::Cube,
                texture: TextureSlot::BoxTop,
                transform: Transform {
                    position: Vec3::new(10.0, -1.22, 1.0),
                    rotation: Quat::from_rotation_y(0.5),
                    scale: Vec3::new(5.5, 1.5, 8.0),
                },
            },
            lighting: Lighting::default(),
        }
    }
}
