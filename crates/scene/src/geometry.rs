//! Fixed vertex tables. Every mesh is a non-indexed triangle list.

use deskscene_common::Vertex;

/// Identifies one of the four static meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeshKind {
    Pyramid,
    Wedge,
    Cube,
    Plane,
}

impl MeshKind {
    pub const ALL: [MeshKind; 4] = [
        MeshKind::Pyramid,
        MeshKind::Wedge,
        MeshKind::Cube,
        MeshKind::Plane,
    ];

    pub fn vertices(self) -> &'static [Vertex] {
        match self {
            MeshKind::Pyramid => &PYRAMID,
            MeshKind::Wedge => &WEDGE,
            MeshKind::Cube => &CUBE,
            MeshKind::Plane => &PLANE,
        }
    }

    pub fn vertex_count(self) -> u32 {
        self.vertices().len() as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            MeshKind::Pyramid => "pyramid",
            MeshKind::Wedge => "wedge",
            MeshKind::Cube => "cube",
            MeshKind::Plane => "plane",
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex::new(position, normal, uv)
}

/// Lamp marker: four sloped faces and a two-triangle base.
#[rustfmt::skip]
pub const PYRAMID: [Vertex; 18] = [
    // front
    v([ 0.0,  1.0,  0.0], [ 0.0,  0.45,  0.9], [1.0, 0.0]),
    v([-1.0, -1.0,  1.0], [ 0.0,  0.45,  0.9], [1.0, 1.0]),
    v([ 1.0, -1.0,  1.0], [ 0.0,  0.45,  0.9], [0.0, 1.0]),
    // right
    v([ 0.0,  1.0,  0.0], [ 0.9,  0.45,  0.0], [1.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [ 0.9,  0.45,  0.0], [1.0, 1.0]),
    v([ 1.0, -1.0, -1.0], [ 0.9,  0.45,  0.0], [0.0, 1.0]),
    // back
    v([ 0.0,  1.0,  0.0], [ 0.0,  0.45, -0.9], [1.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [ 0.0,  0.45, -0.9], [1.0, 1.0]),
    v([-1.0, -1.0, -1.0], [ 0.0,  0.45, -0.9], [0.0, 1.0]),
    // left
    v([ 0.0,  1.0,  0.0], [-0.9,  0.45,  0.0], [1.0, 0.0]),
    v([-1.0, -1.0, -1.0], [-0.9,  0.45,  0.0], [1.0, 1.0]),
    v([-1.0, -1.0,  1.0], [-0.9,  0.45,  0.0], [0.0, 1.0]),
    // base
    v([-1.0, -1.0,  1.0], [ 0.0, -0.9,  0.0], [1.0, 1.0]),
    v([-1.0, -1.0, -1.0], [ 0.0, -0.9,  0.0], [1.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [ 0.0, -0.9,  0.0], [0.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [ 0.0, -0.9,  0.0], [1.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [ 0.0, -0.9,  0.0], [1.0, 1.0]),
    v([-1.0, -1.0,  1.0], [ 0.0, -0.9,  0.0], [0.0, 1.0]),
];

/// One 60° slice of a cylinder: a cap triangle fanned from the axis plus a
/// side quad dropping two units below the cap.
#[rustfmt::skip]
pub const WEDGE: [Vertex; 9] = [
    // cap
    v([0.0,  0.0, 0.0  ], [0.0,  0.43, 0.0], [0.5, 1.0]),
    v([0.5,  0.0, 0.866], [0.0,  0.43, 0.0], [0.0, 0.0]),
    v([1.0,  0.0, 0.0  ], [0.0,  0.43, 0.0], [1.0, 0.0]),
    // side
    v([0.5,  0.0, 0.866], [0.87, 0.0,  0.5], [1.0, 1.0]),
    v([0.5, -2.0, 0.866], [0.87, 0.0,  0.5], [1.0, 0.0]),
    v([1.0,  0.0, 0.0  ], [0.87, 0.0,  0.5], [0.0, 1.0]),
    v([1.0,  0.0, 0.0  ], [0.87, 0.0,  0.5], [0.0, 1.0]),
    v([1.0, -2.0, 0.0  ], [0.87, 0.0,  0.5], [0.0, 0.0]),
    v([0.5, -2.0, 0.866], [0.87, 0.0,  0.5], [1.0, 0.0]),
];

/// Unit cube centred on the origin, two triangles per face.
#[rustfmt::skip]
pub const CUBE: [Vertex; 36] = [
    // -Z
    v([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    // +Z
    v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
    v([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
    v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
    // -X
    v([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    v([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    v([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    // +X
    v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    v([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
    // -Y
    v([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    v([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
    v([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    // +Y
    v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    v([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
];

/// Table slab: 48 x 48 top at y = -2 with sides reaching y = -9.
#[rustfmt::skip]
pub const PLANE: [Vertex; 36] = [
    // top
    v([ 24.0, -2.0,  24.0], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -2.0, -24.0], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    v([-24.0, -2.0,  24.0], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
    v([ 24.0, -2.0, -24.0], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    v([-24.0, -2.0, -24.0], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
    v([-24.0, -2.0,  24.0], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
    // +X side
    v([ 24.0, -2.0,  24.0], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -2.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    v([ 24.0, -9.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -2.0,  24.0], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -9.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -9.0,  24.0], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    // +Z side
    v([ 24.0, -2.0,  24.0], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    v([ 24.0, -9.0,  24.0], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
    v([-24.0, -9.0,  24.0], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    v([ 24.0, -2.0,  24.0], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    v([-24.0, -2.0,  24.0], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
    v([-24.0, -9.0, -24.0], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
    // bottom
    v([ 24.0, -9.0, -24.0], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
    v([ 24.0, -9.0,  24.0], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    v([-24.0, -9.0,  24.0], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
    v([ 24.0, -9.0, -24.0], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
    v([-24.0, -9.0,  24.0], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
    v([-24.0, -9.0, -24.0], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    // -X side
    v([-24.0, -2.0, -24.0], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-24.0, -2.0,  24.0], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    v([-24.0, -9.0,  24.0], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-24.0, -2.0, -24.0], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-24.0, -9.0,  24.0], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-24.0, -9.0, -24.0], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    // -Z side
    v([ 24.0, -2.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    v([ 24.0, -9.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([-24.0, -9.0, -24.0], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    v([ 24.0, -2.0, -24.0], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    v([-24.0, -2.0, -24.0], [-1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-24.0, -9.0, -24.0], [-1.0,  0.0,  0.0], [0.0, 1.0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts() {
        assert_eq!(MeshKind::Pyramid.vertex_count(), 18);
        assert_eq!(MeshKind::Wedge.vertex_count(), 9);
        assert_eq!(MeshKind::Cube.vertex_count(), 36);
        assert_eq!(MeshKind::Plane.vertex_count(), 36);
    }

    #[test]
    fn every_mesh_is_a_triangle_list() {
        for mesh in MeshKind::ALL {
            assert_eq!(mesh.vertices().len() % 3, 0, "{}", mesh.label());
        }
    }

    #[test]
    fn wedge_spans_sixty_degrees() {
        let angles: Vec<f32> = WEDGE
            .iter()
            .filter(|v| v.position[0] != 0.0 || v.position[2] != 0.0)
            .map(|v| v.position[2].atan2(v.position[0]).to_degrees())
            .collect();
        let min = angles.iter().copied().fold(f32::MAX, f32::min);
        let max = angles.iter().copied().fold(f32::MIN, f32::max);
        assert!(min.abs() < 1e-3);
        assert!((max - 60.0).abs() < 0.01);
    }

    #[test]
    fn cube_fits_unit_bounds() {
        for v in CUBE.iter() {
            for c in v.position {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }
}
