//! # Hand-Gesture Interaction Core
//!
//! Fuses an asynchronous hand-landmark stream with the per-frame render tick:
//!
//! - **Hand state** ([`hand`]) - Gesture classification and the shared
//!   single-writer hand-state slot
//! - **Interaction** ([`interaction`]) - The pinch lifecycle state machine
//!   (click-to-select vs drag-to-orbit) and the camera rig seam
//! - **Cursor** ([`cursor`]) - The 3D cursor glyph presenter and hover
//!   side channel
//!
//! The detector callback writes [`hand::HandState`] whenever a video frame
//! finishes processing; the render tick reads it exactly once per frame and
//! treats it as that tick's snapshot.

pub mod cursor;
pub mod hand;
pub mod interaction;

pub use hand::{GestureClassifier, GestureConfig, HandState, HandStateSlot, LandmarkFrame};
pub use interaction::{CameraRig, InteractionConfig, InteractionController, InteractionPhase};
