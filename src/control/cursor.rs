//! Cursor glyph presenter
//!
//! Purely derived visual state: maps the normalized hand cursor to a point
//! at a fixed distance in front of the camera and eases the glyph toward it.
//! The easing is a per-tick exponential step, so apparent speed varies with
//! frame rate. Also owns the hover side channel the UI highlights from.

use cgmath::Vector3;

use crate::control::hand::HandState;
use crate::gfx::camera::orbit_camera::OrbitCamera;
use crate::gfx::picking::{ray_through_ndc, Ray};

#[derive(Debug, Clone, Copy)]
pub struct CursorConfig {
    /// Distance from the eye at which the glyph floats.
    pub reach: f32,
    /// Exponential smoothing factor applied each tick.
    pub smoothing: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            reach: 80.0,
            smoothing: 0.2,
        }
    }
}

pub struct CursorPresenter {
    config: CursorConfig,
    position: Vector3<f32>,
    visible: bool,
    hovered: Option<String>,
}

impl CursorPresenter {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            position: Vector3::new(0.0, 0.0, 0.0),
            visible: false,
            hovered: None,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Normalized-device coordinates for a hand cursor position.
    pub fn ndc(hand: &HandState) -> (f32, f32) {
        (hand.x * 2.0 - 1.0, -(hand.y * 2.0) + 1.0)
    }

    /// Advance the glyph for this tick. Returns the world-space ray under
    /// the cursor (also used for the selection raycast), or `None` when the
    /// hand is invisible, in which case the glyph hides and no interpolation
    /// happens.
    pub fn tick(&mut self, hand: &HandState, camera: &OrbitCamera) -> Option<Ray> {
        if !hand.is_visible {
            self.visible = false;
            return None;
        }
        self.visible = true;

        let (ndc_x, ndc_y) = Self::ndc(hand);
        let ray = ray_through_ndc(ndc_x, ndc_y, camera);

        let target = camera.eye + ray.direction * self.config.reach;
        self.position += (target - self.position) * self.config.smoothing;

        Some(ray)
    }

    /// Record the current hover target. Returns true when it changed, which
    /// is the edge the application forwards to `on_hover_change`.
    pub fn set_hover(&mut self, name: Option<String>) -> bool {
        if self.hovered == name {
            return false;
        }
        self.hovered = name;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(90.0, 0.0, 1.1, Vector3::zero(), 16.0 / 9.0)
    }

    fn visible_hand(x: f32, y: f32) -> HandState {
        HandState {
            x,
            y,
            is_pinching: false,
            is_visible: true,
        }
    }

    #[test]
    fn ndc_mapping_centers_and_flips_y() {
        let (x, y) = CursorPresenter::ndc(&visible_hand(0.5, 0.5));
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);

        let (x, y) = CursorPresenter::ndc(&visible_hand(1.0, 0.0));
        assert_eq!((x, y), (1.0, 1.0));
    }

    #[test]
    fn glyph_eases_toward_fixed_reach_point() {
        let camera = camera();
        let mut presenter = CursorPresenter::new(CursorConfig::default());
        let hand = visible_hand(0.5, 0.5);

        let ray = presenter.tick(&hand, &camera).unwrap();
        let target = camera.eye + ray.direction * 80.0;

        // First tick covers exactly the smoothing fraction of the gap.
        let expected = target * 0.2;
        assert!((presenter.position() - expected).magnitude() < 1e-3);

        // Repeated ticks converge on the reach point.
        for _ in 0..200 {
            presenter.tick(&hand, &camera);
        }
        assert!((presenter.position() - target).magnitude() < 1e-2);
        assert!(((presenter.position() - camera.eye).magnitude() - 80.0).abs() < 0.1);
    }

    #[test]
    fn invisible_hand_hides_glyph_and_freezes_position() {
        let camera = camera();
        let mut presenter = CursorPresenter::new(CursorConfig::default());

        presenter.tick(&visible_hand(0.3, 0.6), &camera);
        let frozen = presenter.position();

        let hidden = HandState {
            is_visible: false,
            ..visible_hand(0.9, 0.9)
        };
        assert!(presenter.tick(&hidden, &camera).is_none());
        assert!(!presenter.is_visible());
        assert_eq!(presenter.position(), frozen);
    }

    #[test]
    fn hover_reports_only_transitions() {
        let mut presenter = CursorPresenter::new(CursorConfig::default());
        assert!(presenter.set_hover(Some("Earth".into())));
        assert!(!presenter.set_hover(Some("Earth".into())));
        assert!(presenter.set_hover(None));
        assert!(!presenter.set_hover(None));
    }
}
