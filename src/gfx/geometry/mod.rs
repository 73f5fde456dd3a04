//! # Procedural Geometry
//!
//! Mesh generation for the primitive shapes the scene is built from. No
//! model files are loaded; every body is generated at startup.

pub mod primitives;

pub use primitives::{generate_box, generate_ring, generate_sphere};

/// Raw geometry buffers produced by the generators.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }
}
