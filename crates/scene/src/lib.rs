//! Static scene data: mesh vertex tables and the placement of every object.
//!
//! # Invariants
//! - Nothing in this crate changes after construction.
//! - Cylinder-like objects are expressed as wedge rings, never as their own meshes.

pub mod geometry;
pub mod placement;

pub use geometry::MeshKind;
pub use placement::{Lighting, Prop, Scene, WEDGE_STEPS_DEGREES, WedgeRing};

pub fn crate_info() -> &'static str {
    "deskscene-scene v0.1.0"
}
