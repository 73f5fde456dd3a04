//! Pinch interaction state machine
//!
//! Runs once per render tick against that tick's [`HandState`] snapshot and
//! raycast result. Disambiguates "pinch-click on a planet" from "pinch-drag
//! to orbit the camera" with a movement threshold: a pinch that starts over
//! a selectable object arms a candidate selection, and only converts to a
//! camera drag once the cursor has moved far enough. On conversion the drag
//! origin is re-captured so the camera does not jump.

use std::f32::consts::PI;

use crate::control::hand::HandState;

/// Lower polar clamp, keeping the camera off the poles.
pub const POLAR_MIN: f32 = 0.1;
/// Upper polar clamp.
pub const POLAR_MAX: f32 = PI - 0.1;

/// The seam between the state machine and whatever orbit camera is in use.
///
/// Polar input is always pre-clamped by the caller; implementations perform
/// no additional validation and apply angles synchronously (any smoothing
/// belongs to the camera's own target interpolation).
pub trait CameraRig {
    fn azimuthal_angle(&self) -> f32;
    fn polar_angle(&self) -> f32;
    fn set_azimuthal_angle(&mut self, radians: f32);
    fn set_polar_angle(&mut self, radians: f32);
}

#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Cursor movement (normalized units) past which an armed selection
    /// converts into a camera drag.
    pub drag_threshold: f32,
    /// Cursor-delta to camera-angle multiplier.
    pub rotate_sensitivity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 0.04,
            rotate_sensitivity: 4.0,
        }
    }
}

/// Reference frame captured when a pinch begins, and re-captured when an
/// armed selection converts to a drag.
#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    x: f32,
    y: f32,
    azimuth: f32,
    polar: f32,
}

impl DragOrigin {
    fn capture(hand: &HandState, rig: &dyn CameraRig) -> Self {
        Self {
            x: hand.x,
            y: hand.y,
            azimuth: rig.azimuthal_angle(),
            polar: rig.polar_angle(),
        }
    }
}

/// Where the pinch lifecycle currently stands.
///
/// At most one non-idle phase is active at a time; `Armed` carries the
/// selection candidate that will be emitted if the pinch releases before
/// the cursor moves past the drag threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionPhase<P> {
    Idle,
    Armed(P),
    Dragging,
}

/// Per-tick interaction controller.
///
/// `P` is the opaque selection payload carried by selectable scene objects
/// and returned verbatim from [`tick`](InteractionController::tick) on a
/// confirmed click.
pub struct InteractionController<P> {
    config: InteractionConfig,
    phase: InteractionPhase<P>,
    origin: Option<DragOrigin>,
    was_pinching: bool,
}

impl<P: Clone> InteractionController<P> {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            phase: InteractionPhase::Idle,
            origin: None,
            was_pinching: false,
        }
    }

    pub fn phase(&self) -> &InteractionPhase<P> {
        &self.phase
    }

    /// True while a pinch-drag is rotating the camera. External camera
    /// writers (auto-rotate) must stay away while this holds.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, InteractionPhase::Dragging)
    }

    /// True while any pinch cycle is in progress.
    pub fn is_engaged(&self) -> bool {
        !matches!(self.phase, InteractionPhase::Idle)
    }

    /// Advance the state machine by one render tick.
    ///
    /// `hand` is this tick's snapshot, `hit` the nearest selectable object
    /// under the cursor (if any), `rig` the orbit camera. Returns the
    /// confirmed selection payload on a click release, otherwise `None`.
    pub fn tick(
        &mut self,
        hand: &HandState,
        hit: Option<&P>,
        rig: &mut dyn CameraRig,
    ) -> Option<P> {
        // Losing the hand cancels any in-progress cycle without selecting.
        if !hand.is_visible {
            self.phase = InteractionPhase::Idle;
            self.origin = None;
            self.was_pinching = false;
            return None;
        }

        let pinching = hand.is_pinching;
        let edge_rise = pinching && !self.was_pinching;
        let edge_fall = !pinching && self.was_pinching;
        self.was_pinching = pinching;

        if edge_rise {
            self.origin = Some(DragOrigin::capture(hand, rig));
            self.phase = match hit {
                Some(payload) => InteractionPhase::Armed(payload.clone()),
                None => InteractionPhase::Dragging,
            };
            return None;
        }

        if pinching {
            if let (InteractionPhase::Armed(_), Some(origin)) = (&self.phase, self.origin) {
                let moved = (hand.x - origin.x).hypot(hand.y - origin.y);
                if moved >= self.config.drag_threshold {
                    // Candidate discarded; restart the reference frame here
                    // so the camera picks up from its current angles.
                    self.origin = Some(DragOrigin::capture(hand, rig));
                    self.phase = InteractionPhase::Dragging;
                }
            }

            if let (InteractionPhase::Dragging, Some(origin)) = (&self.phase, self.origin) {
                let delta_x = hand.x - origin.x;
                let delta_y = hand.y - origin.y;
                let s = self.config.rotate_sensitivity;
                rig.set_azimuthal_angle(origin.azimuth - delta_x * s);
                rig.set_polar_angle((origin.polar - delta_y * s).clamp(POLAR_MIN, POLAR_MAX));
            }
            return None;
        }

        if edge_fall {
            self.origin = None;
            let released = std::mem::replace(&mut self.phase, InteractionPhase::Idle);
            if let InteractionPhase::Armed(payload) = released {
                return Some(payload);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubRig {
        azimuth: f32,
        polar: f32,
        writes: usize,
    }

    impl StubRig {
        fn new(azimuth: f32, polar: f32) -> Self {
            Self {
                azimuth,
                polar,
                writes: 0,
            }
        }
    }

    impl CameraRig for StubRig {
        fn azimuthal_angle(&self) -> f32 {
            self.azimuth
        }
        fn polar_angle(&self) -> f32 {
            self.polar
        }
        fn set_azimuthal_angle(&mut self, radians: f32) {
            self.azimuth = radians;
            self.writes += 1;
        }
        fn set_polar_angle(&mut self, radians: f32) {
            self.polar = radians;
            self.writes += 1;
        }
    }

    fn hand(x: f32, y: f32, pinching: bool) -> HandState {
        HandState {
            x,
            y,
            is_pinching: pinching,
            is_visible: true,
        }
    }

    fn controller() -> InteractionController<&'static str> {
        InteractionController::new(InteractionConfig::default())
    }

    #[test]
    fn pinch_edges_arm_once_and_release_once() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.0);
        let sequence = [false, true, true, false];

        let mut armed_transitions = 0;
        let mut selections = 0;
        for pinching in sequence {
            let was_armed = matches!(ctl.phase(), InteractionPhase::Armed(_));
            let selected = ctl.tick(&hand(0.5, 0.5, pinching), Some(&"mercury"), &mut rig);
            if !was_armed && matches!(ctl.phase(), InteractionPhase::Armed(_)) {
                armed_transitions += 1;
            }
            if selected.is_some() {
                selections += 1;
            }
        }

        assert_eq!(armed_transitions, 1);
        assert_eq!(selections, 1);
        assert!(matches!(ctl.phase(), InteractionPhase::Idle));
    }

    #[test]
    fn steady_pinch_over_planet_selects_without_moving_camera() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.3, 1.2);

        ctl.tick(&hand(0.5, 0.5, true), Some(&"venus"), &mut rig);
        // Hold with sub-threshold jitter.
        for i in 0..10 {
            let wobble = 0.001 * i as f32;
            let selected = ctl.tick(&hand(0.5 + wobble, 0.5, true), Some(&"venus"), &mut rig);
            assert!(selected.is_none());
        }
        let selected = ctl.tick(&hand(0.5, 0.5, false), Some(&"venus"), &mut rig);

        assert_eq!(selected, Some("venus"));
        assert_eq!(rig.writes, 0, "click must not move the camera");
        assert_eq!(rig.azimuth, 0.3);
        assert_eq!(rig.polar, 1.2);
    }

    #[test]
    fn movement_past_threshold_converts_to_drag_without_jump() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.5, 1.0);

        ctl.tick(&hand(0.5, 0.5, true), Some(&"earth"), &mut rig);
        assert!(matches!(ctl.phase(), InteractionPhase::Armed(_)));

        // Move past the threshold: candidate dropped, origin re-captured, so
        // this tick applies a zero delta (no discontinuity).
        ctl.tick(&hand(0.56, 0.5, true), Some(&"earth"), &mut rig);
        assert!(ctl.is_dragging());
        assert!((rig.azimuth - 0.5).abs() < 1e-6);
        assert!((rig.polar - 1.0).abs() < 1e-6);

        // Subsequent movement is measured from the reset origin.
        ctl.tick(&hand(0.58, 0.5, true), None, &mut rig);
        assert!((rig.azimuth - (0.5 - 0.02 * 4.0)).abs() < 1e-5);

        let selected = ctl.tick(&hand(0.58, 0.5, false), Some(&"earth"), &mut rig);
        assert_eq!(selected, None, "drag release must not select");
    }

    #[test]
    fn drag_angles_track_cursor_delta_direction() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.5);

        ctl.tick(&hand(0.5, 0.5, true), None, &mut rig);
        let mut last_azimuth = rig.azimuth;
        let mut last_polar = rig.polar;
        for i in 1..=5 {
            let step = 0.02 * i as f32;
            ctl.tick(&hand(0.5 + step, 0.5 + step, true), None, &mut rig);
            assert!(rig.azimuth < last_azimuth, "azimuth decreases as x grows");
            assert!(rig.polar < last_polar, "polar decreases as y grows");
            last_azimuth = rig.azimuth;
            last_polar = rig.polar;
        }
    }

    #[test]
    fn empty_space_pinch_drags_immediately() {
        let mut ctl = controller();
        let mut rig = StubRig::new(1.0, 1.0);

        ctl.tick(&hand(0.5, 0.5, true), None, &mut rig);
        assert!(ctl.is_dragging());

        ctl.tick(&hand(0.52, 0.5, true), None, &mut rig);
        assert!(rig.writes > 0, "camera updates begin on the next tick");
        assert!((rig.azimuth - (1.0 - 0.02 * 4.0)).abs() < 1e-5);
    }

    #[test]
    fn visibility_loss_cancels_armed_selection() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.0);

        ctl.tick(&hand(0.5, 0.5, true), Some(&"mars"), &mut rig);
        assert!(ctl.is_engaged());

        let lost = HandState {
            is_visible: false,
            ..hand(0.5, 0.5, true)
        };
        assert_eq!(ctl.tick(&lost, None, &mut rig), None);
        assert!(matches!(ctl.phase(), InteractionPhase::Idle));

        // Hand returns unpinched; the release edge must not fire.
        let selected = ctl.tick(&hand(0.5, 0.5, false), Some(&"mars"), &mut rig);
        assert_eq!(selected, None);
    }

    #[test]
    fn visibility_loss_cancels_active_drag() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.0);

        ctl.tick(&hand(0.5, 0.5, true), None, &mut rig);
        ctl.tick(&hand(0.6, 0.6, true), None, &mut rig);
        assert!(ctl.is_dragging());

        let lost = HandState {
            is_visible: false,
            ..hand(0.6, 0.6, true)
        };
        ctl.tick(&lost, None, &mut rig);
        assert!(!ctl.is_engaged());

        // A fresh pinch after recovery starts a new cycle from scratch.
        ctl.tick(&hand(0.2, 0.2, true), None, &mut rig);
        assert!(ctl.is_dragging());
    }

    #[test]
    fn polar_stays_clamped_for_any_drag_distance() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.0);

        ctl.tick(&hand(0.5, 0.5, true), None, &mut rig);
        for y in [5.0, -5.0, 100.0, -100.0] {
            ctl.tick(&hand(0.5, y, true), None, &mut rig);
            assert!(rig.polar >= POLAR_MIN && rig.polar <= POLAR_MAX);
        }
    }

    #[test]
    fn origin_exists_only_while_engaged() {
        let mut ctl = controller();
        let mut rig = StubRig::new(0.0, 1.0);

        assert!(ctl.origin.is_none());
        ctl.tick(&hand(0.5, 0.5, true), Some(&"saturn"), &mut rig);
        assert!(ctl.origin.is_some());
        ctl.tick(&hand(0.5, 0.5, false), Some(&"saturn"), &mut rig);
        assert!(ctl.origin.is_none());
    }
}
