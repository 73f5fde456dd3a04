//! # Graphics Module
//!
//! All graphics-related functionality for the Orrery engine: the orbit
//! camera, cursor picking, scene management, procedural geometry and the
//! wgpu render pipeline.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Azimuth/polar orbit camera with mouse
//!   fallback controls
//! - **Picking** ([`picking`]) - Cursor raycasts against sphere-bounded
//!   bodies
//! - **Scene Management** ([`scene`]) - Bodies, motion state, GPU uniforms
//! - **Geometry** ([`geometry`]) - Procedural sphere/ring/box generation
//! - **Render Engine** ([`render_engine`]) - Surface, pipeline and the
//!   per-frame forward pass

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod render_engine;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use render_engine::RenderEngine;
