use crate::frame::{Frame, Pipeline};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a composed frame and produces output. It never
/// reorders or drops draws.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one composed frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable listing of a frame: projection, camera, and one
/// line per draw in submission order.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        let p = &frame.projection;
        out.push_str(&format!(
            "=== Frame (mode={:?}, aspect={:.4}, fov={:.1}) ===\n",
            p.mode, p.aspect, p.fov_degrees
        ));
        let (eye, front) = (frame.view_position, frame.view_front);
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) front=({:.3}, {:.3}, {:.3})\n",
            eye.x, eye.y, eye.z, front.x, front.y, front.z
        ));
        let light = frame.lighting.light_position;
        out.push_str(&format!(
            "Light: pos=({:.2}, {:.2}, {:.2})\n",
            light.x, light.y, light.z
        ));
        out.push_str(&format!("Draws: {}\n", frame.draws.len()));

        for (i, draw) in frame.draws.iter().enumerate() {
            let origin = draw.model.w_axis;
            let pipeline = match draw.pipeline {
                Pipeline::Lit => "lit ",
                Pipeline::Lamp => "lamp",
            };
            let texture = draw.texture.map_or("-", |t| t.name());
            out.push_str(&format!(
                "  [{i:02}] {pipeline} {:<14} mesh={:<7} verts={:<2} tex={:<12} at=({:.2}, {:.2}, {:.2})\n",
                draw.label,
                draw.mesh.label(),
                draw.vertex_count,
                texture,
                origin.x,
                origin.y,
                origin.z
            ));
        }

        out
    }
}
