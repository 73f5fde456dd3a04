//! # Orbiting Body Motion
//!
//! Independent per-frame kinematics for every moving body, all scaled by one
//! shared `time_speed` scalar (the "time dilation" used while an info card
//! is open). Each body keeps its own phase accumulator advanced by
//! `dt * base_speed * time_speed`, so speed changes never make positions
//! jump. Clocks are injected; nothing here reads wall time on its own.

pub mod drifter;
pub mod orbit;
pub mod probe;

pub use drifter::DriftPath;
pub use orbit::PlanetOrbit;
pub use probe::{LaunchState, ProbeOrbit};

/// How a scene body moves each tick.
pub enum BodyMotion {
    /// Static bodies (the sun, the cursor glyph).
    Fixed,
    Orbit(PlanetOrbit),
    Probe(ProbeOrbit),
    Drift(DriftPath),
}
