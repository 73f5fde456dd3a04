// src/lib.rs
//! Orrery 3D Engine
//!
//! An interactive solar-system portfolio renderer built on wgpu and winit.
//! Resume sections orbit as planets; a hand-gesture interface (pinch to
//! select, pinch-drag to orbit the camera) runs alongside mouse controls.

pub mod app;
pub mod content;
pub mod control;
pub mod error;
pub mod gfx;
pub mod motion;
pub mod ui;

// Re-export main types for convenience
pub use app::OrreryApp;
pub use control::hand::{GestureClassifier, HandState, LandmarkFrame};

/// Creates a default Orrery application instance
pub fn default() -> OrreryApp {
    pollster::block_on(OrreryApp::new())
}
