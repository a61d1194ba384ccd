//! Per-frame scene composition.
//!
//! Turns the static scene, the camera and the current view mode into an
//! ordered draw list. Backends replay the list verbatim; draw order is part
//! of the contract.

use crate::camera::FlyCamera;
use crate::projection::Projection;
use deskscene_common::{TextureSlot, Transform, ViewMode};
use deskscene_scene::{Lighting, MeshKind, Prop, Scene, WedgeRing};
use glam::{Mat4, Vec3};
use serde::Serialize;

/// Which shader program a draw goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pipeline {
    /// Textured Phong lighting against the point light.
    Lit,
    /// Flat white, no texture.
    Lamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawCommand {
    pub label: &'static str,
    pub pipeline: Pipeline,
    pub mesh: MeshKind,
    pub texture: Option<TextureSlot>,
    pub model: Mat4,
    pub vertex_count: u32,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub projection: Projection,
    pub view: Mat4,
    pub projection_matrix: Mat4,
    pub view_position: Vec3,
    pub view_front: Vec3,
    pub lighting: Lighting,
    pub clear_color: [f64; 4],
    pub draws: Vec<DrawCommand>,
}

impl Frame {
    pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Compose a frame for a framebuffer of `width` x `height` pixels.
    pub fn compose(
        scene: &Scene,
        camera: &FlyCamera,
        mode: ViewMode,
        width: u32,
        height: u32,
    ) -> Self {
        let projection = Projection::new(mode, camera.zoom, width, height);

        let mut draws = Vec::with_capacity(3 + scene.rings.len() * 6);
        draws.push(prop_draw(&scene.table));
        for ring in &scene.rings {
            push_wedge_ring(&mut draws, ring);
        }
        draws.push(prop_draw(&scene.boxed));
        draws.push(lamp_draw(&scene.lighting));
        tracing::trace!(?mode, aspect = projection.aspect, draws = draws.len(), "composed frame");

        Self {
            projection,
            view: camera.view_matrix(),
            projection_matrix: projection.matrix(),
            view_position: camera.position,
            view_front: camera.front,
            lighting: scene.lighting,
            clear_color: Self::CLEAR_COLOR,
            draws,
        }
    }

    pub fn lit_draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.draws.iter().filter(|d| d.pipeline == Pipeline::Lit)
    }
}

fn textured(label: &'static str, mesh: MeshKind, texture: TextureSlot, t: &Transform) -> DrawCommand {
    DrawCommand {
        label,
        pipeline: Pipeline::Lit,
        mesh,
        texture: Some(texture),
        model: t.to_matrix(),
        vertex_count: mesh.vertex_count(),
    }
}

fn prop_draw(prop: &Prop) -> DrawCommand {
    textured(prop.name, prop.mesh, prop.texture, &prop.transform)
}

/// Six wedge draws, one per rotation step, all sharing the ring's texture.
fn push_wedge_ring(draws: &mut Vec<DrawCommand>, ring: &WedgeRing) {
    draws.extend(
        ring.step_transforms()
            .map(|t| textured(ring.name, MeshKind::Wedge, ring.texture, &t)),
    );
}

fn lamp_draw(lighting: &Lighting) -> DrawCommand {
    DrawCommand {
        label: "lamp",
        pipeline: Pipeline::Lamp,
        mesh: MeshKind::Pyramid,
        texture: None,
        model: lighting.lamp_transform().to_matrix(),
        vertex_count: MeshKind::Pyramid.vertex_count(),
    }
}
