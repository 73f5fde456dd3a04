//! Project probe motion and the timed launch boost.
//!
//! Probes follow an inclined elliptical path with a vertical wobble. A
//! "launch" temporarily multiplies the probe's own speed and brightens its
//! trail for a fixed wall-clock duration, then reverts. The reversion is an
//! explicit timed state machine checked each tick against an injected
//! current time, so it is deterministic and testable without real delays.

use cgmath::Vector3;

/// Speed multiplier while launching.
pub const LAUNCH_BOOST: f32 = 4.0;
/// Wall-clock seconds a launch lasts.
pub const LAUNCH_DURATION: f32 = 2.0;
/// Vertical wobble amplitude.
const WOBBLE_HEIGHT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchState {
    Idle,
    Launching { expires_at: f32 },
}

#[derive(Debug, Clone, Copy)]
pub struct ProbeOrbit {
    pub radius: f32,
    pub base_speed: f32,
    pub phase: f32,
    pub launch: LaunchState,
}

impl ProbeOrbit {
    pub fn new(radius: f32, base_speed: f32, phase: f32) -> Self {
        Self {
            radius,
            base_speed,
            phase,
            launch: LaunchState::Idle,
        }
    }

    /// Begin a launch at wall-clock second `now`. Returns false if one is
    /// already in flight (launching is not re-entrant).
    pub fn launch(&mut self, now: f32) -> bool {
        if matches!(self.launch, LaunchState::Launching { .. }) {
            return false;
        }
        self.launch = LaunchState::Launching {
            expires_at: now + LAUNCH_DURATION,
        };
        true
    }

    pub fn is_launching(&self) -> bool {
        matches!(self.launch, LaunchState::Launching { .. })
    }

    /// Advance by `dt` seconds; `now` is the injected wall-clock used to
    /// expire the launch boost. The boost runs on wall time deliberately, so
    /// time dilation doesn't stretch it.
    pub fn advance(&mut self, dt: f32, now: f32, time_speed: f32) {
        if let LaunchState::Launching { expires_at } = self.launch {
            if now >= expires_at {
                self.launch = LaunchState::Idle;
            }
        }

        let boost = if self.is_launching() { LAUNCH_BOOST } else { 1.0 };
        self.phase += dt * self.base_speed * super::orbit::ORBIT_RATE * time_speed * boost;
    }

    /// Position along the inclined ellipse.
    pub fn position(&self) -> Vector3<f32> {
        Self::position_at(self.phase, self.radius)
    }

    /// A point slightly ahead on the path, used to orient the probe along
    /// its direction of travel.
    pub fn heading_target(&self) -> Vector3<f32> {
        Self::position_at(self.phase + 0.01, self.radius)
    }

    fn position_at(t: f32, radius: f32) -> Vector3<f32> {
        Vector3::new(
            t.cos() * radius,
            (t * 3.0).sin() * WOBBLE_HEIGHT,
            t.sin() * radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_boosts_speed_until_expiry() {
        let mut boosted = ProbeOrbit::new(40.0, 1.0, 0.0);
        let mut plain = ProbeOrbit::new(40.0, 1.0, 0.0);

        assert!(boosted.launch(0.0));
        boosted.advance(1.0, 1.0, 1.0);
        plain.advance(1.0, 1.0, 1.0);
        assert!((boosted.phase - plain.phase * LAUNCH_BOOST).abs() < 1e-6);

        // Past the expiry the boost is gone.
        boosted.advance(1.5, 2.5, 1.0);
        assert!(!boosted.is_launching());
        let resumed = boosted.phase;
        boosted.advance(1.0, 3.5, 1.0);
        assert!((boosted.phase - resumed - 1.0 * super::super::orbit::ORBIT_RATE).abs() < 1e-6);
    }

    #[test]
    fn launch_is_not_reentrant() {
        let mut probe = ProbeOrbit::new(40.0, 1.0, 0.0);
        assert!(probe.launch(0.0));
        assert!(!probe.launch(0.5));

        // After reverting, a new launch is accepted.
        probe.advance(0.1, 3.0, 1.0);
        assert!(probe.launch(3.0));
    }

    #[test]
    fn time_dilation_freezes_the_path_but_not_the_launch_clock() {
        let mut probe = ProbeOrbit::new(40.0, 1.0, 0.0);
        probe.launch(0.0);
        let before = probe.position();

        probe.advance(3.0, 3.0, 0.0);
        assert_eq!(probe.position(), before, "frozen path");
        assert!(!probe.is_launching(), "launch expired on wall time");
    }

    #[test]
    fn wobble_stays_bounded() {
        let mut probe = ProbeOrbit::new(40.0, 2.0, 0.0);
        for _ in 0..1000 {
            probe.advance(0.05, 0.0, 1.0);
            let p = probe.position();
            assert!(p.y.abs() <= WOBBLE_HEIGHT + 1e-4);
        }
    }
}
