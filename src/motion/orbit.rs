//! Circular planet orbits with axial spin.

use cgmath::Vector3;
use rand::Rng;

/// Global factor mapping content speeds to radians per second.
pub const ORBIT_RATE: f32 = 0.2;
/// Spin applied per phase-second, scaled by the body's signed spin rate.
pub const SPIN_RATE: f32 = 0.02;

#[derive(Debug, Clone, Copy)]
pub struct PlanetOrbit {
    pub radius: f32,
    pub base_speed: f32,
    /// Orbit phase accumulator in radians.
    pub phase: f32,
    /// Signed axial spin rate; randomized so planets don't rotate in lockstep.
    pub spin_rate: f32,
    /// Accumulated axial rotation in radians.
    pub spin: f32,
}

impl PlanetOrbit {
    /// Build an orbit with a random starting phase and spin direction.
    pub fn new(radius: f32, base_speed: f32, rng: &mut impl Rng) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            radius,
            base_speed,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            spin_rate: (rng.random_range(0.1..0.6)) * direction,
            spin: 0.0,
        }
    }

    /// Advance by `dt` seconds under the shared time-dilation scalar.
    pub fn advance(&mut self, dt: f32, time_speed: f32) {
        let step = dt * self.base_speed * ORBIT_RATE * time_speed;
        self.phase += step;
        self.spin += self.spin_rate * SPIN_RATE * dt * 60.0 * time_speed;
    }

    /// Current position on the orbital plane.
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(
            self.phase.cos() * self.radius,
            0.0,
            self.phase.sin() * self.radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::MetricSpace;

    fn orbit(phase: f32) -> PlanetOrbit {
        PlanetOrbit {
            radius: 20.0,
            base_speed: 0.5,
            phase,
            spin_rate: 0.3,
            spin: 0.0,
        }
    }

    #[test]
    fn zero_time_speed_freezes_position() {
        let mut o = orbit(1.0);
        let before = o.position();
        for _ in 0..100 {
            o.advance(0.016, 0.0);
        }
        assert_eq!(o.position().distance(before), 0.0);
        assert_eq!(o.spin, 0.0);
    }

    #[test]
    fn double_time_speed_advances_twice_as_far() {
        let mut normal = orbit(0.0);
        let mut dilated = orbit(0.0);

        for _ in 0..60 {
            normal.advance(1.0 / 60.0, 1.0);
        }
        for _ in 0..60 {
            dilated.advance(1.0 / 60.0, 2.0);
        }

        assert!((dilated.phase - 2.0 * normal.phase).abs() < 1e-5);
    }

    #[test]
    fn position_stays_on_the_orbit_circle() {
        let mut o = orbit(0.0);
        for _ in 0..500 {
            o.advance(0.02, 1.3);
            let p = o.position();
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 20.0).abs() < 1e-3);
            assert_eq!(p.y, 0.0);
        }
    }
}
