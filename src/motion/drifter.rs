//! Interstellar drifter motion: a bounded parametric path that weaves
//! through the system without ever orbiting it, plus a slow tumble.

use cgmath::Vector3;

/// Path parameter rate in radians per second.
const DRIFT_RATE: f32 = 0.15;

#[derive(Debug, Clone, Copy)]
pub struct DriftPath {
    /// Per-axis amplitudes from the content data.
    pub amplitude: Vector3<f32>,
    /// Path parameter accumulator.
    pub t: f32,
    /// Accumulated tumble angles (converted to a rotation when rendered).
    pub tumble: (f32, f32),
}

impl DriftPath {
    pub fn new(amplitude: [f32; 3]) -> Self {
        Self {
            amplitude: Vector3::new(amplitude[0], amplitude[1], amplitude[2]),
            t: 0.0,
            tumble: (0.0, 0.0),
        }
    }

    pub fn advance(&mut self, dt: f32, time_speed: f32) {
        self.t += dt * DRIFT_RATE * time_speed;
        // Tumble rates are tuned per 60 Hz frame, hence the 60x.
        self.tumble.0 += 0.02 * dt * 60.0 * time_speed;
        self.tumble.1 += 0.03 * dt * 60.0 * time_speed;
    }

    /// Position on the bounded parametric curve; the incommensurate
    /// frequencies keep the path from closing on itself.
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(
            (self.t * 0.5).sin() * self.amplitude.x * 2.0,
            (self.t * 0.3).cos() * self.amplitude.y,
            (self.t * 0.5).cos() * self.amplitude.z * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_bounded_by_amplitudes() {
        let mut drift = DriftPath::new([40.0, 20.0, -50.0]);
        for _ in 0..2000 {
            drift.advance(0.05, 1.5);
            let p = drift.position();
            assert!(p.x.abs() <= 80.0 + 1e-3);
            assert!(p.y.abs() <= 20.0 + 1e-3);
            assert!(p.z.abs() <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn time_dilation_scales_drift() {
        let mut slow = DriftPath::new([10.0, 10.0, 10.0]);
        let mut fast = DriftPath::new([10.0, 10.0, 10.0]);

        slow.advance(2.0, 1.0);
        fast.advance(2.0, 2.0);
        assert!((fast.t - 2.0 * slow.t).abs() < 1e-6);

        let frozen = slow.position();
        slow.advance(5.0, 0.0);
        assert_eq!(slow.position(), frozen);
    }
}
