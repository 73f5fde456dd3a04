//! Hand state and gesture classification
//!
//! The landmark detector runs on its own cadence (often slower than the
//! render loop) and may live on a worker thread. Its results are reduced to
//! a small [`HandState`] record and published through [`HandStateSlot`],
//! a single-writer slot with whole-record replace semantics: a render tick
//! either sees the previous record or the new one, never a mix.

use std::sync::{Arc, Mutex};

/// Landmark index of the index fingertip in the detector's 21-point layout.
pub const INDEX_FINGERTIP: usize = 8;
/// Landmark index of the thumb tip.
pub const THUMB_TIP: usize = 4;

/// Normalized hand pose for one render tick.
///
/// `x`/`y` are the cursor position in `[0, 1]` (x mirrored so the cursor
/// tracks intuitively for a camera-facing user). While `is_visible` is false
/// the other fields hold their last known values and are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandState {
    pub x: f32,
    pub y: f32,
    pub is_pinching: bool,
    pub is_visible: bool,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            is_pinching: false,
            is_visible: false,
        }
    }
}

/// One hand's landmark set for one processed video frame, in normalized
/// image space.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    pub points: Vec<[f32; 2]>,
}

impl LandmarkFrame {
    /// Index fingertip and thumb tip, or `None` if the frame is malformed
    /// (too few points or non-finite coordinates). Malformed frames are
    /// treated exactly like "no hand detected".
    fn fingertips(&self) -> Option<([f32; 2], [f32; 2])> {
        let index = *self.points.get(INDEX_FINGERTIP)?;
        let thumb = *self.points.get(THUMB_TIP)?;
        let finite =
            index.iter().chain(thumb.iter()).all(|c| c.is_finite());
        finite.then_some((index, thumb))
    }
}

/// Shared slot holding the latest [`HandState`].
///
/// Written by the classifier (possibly on a detector thread), read once per
/// render tick. Replaces the whole record on every write so readers never
/// observe a torn update; staleness between detections is expected.
#[derive(Clone, Default)]
pub struct HandStateSlot {
    inner: Arc<Mutex<HandState>>,
}

impl HandStateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the record wholesale.
    pub fn store(&self, state: HandState) {
        *self.lock() = state;
    }

    /// Mark the hand as lost, keeping the last cursor/pinch values.
    pub fn mark_lost(&self) {
        self.lock().is_visible = false;
    }

    /// Copy out the current record.
    pub fn snapshot(&self) -> HandState {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HandState> {
        // The guarded value is a plain copy type; a poisoned lock still
        // holds a coherent record.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Maximum thumb-to-index distance (normalized image units) that still
    /// counts as a pinch. Tunable; the default is not claimed optimal.
    pub pinch_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.08,
        }
    }
}

/// Converts raw landmark frames into [`HandState`] records.
///
/// Clone one of these into the detector callback or worker thread; every
/// clone writes into the same slot.
#[derive(Clone)]
pub struct GestureClassifier {
    slot: HandStateSlot,
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(slot: HandStateSlot, config: GestureConfig) -> Self {
        Self { slot, config }
    }

    /// Ingest one detector result: a landmark frame, or `None` when no hand
    /// was found. Infallible; anything unusable degrades to "hand lost".
    pub fn ingest(&self, frame: Option<&LandmarkFrame>) {
        let Some((index, thumb)) = frame.and_then(LandmarkFrame::fingertips) else {
            self.slot.mark_lost();
            return;
        };

        let pinch_distance = (index[0] - thumb[0]).hypot(index[1] - thumb[1]);
        self.slot.store(HandState {
            // Mirrored horizontally for a camera-facing user.
            x: 1.0 - index[0],
            y: index[1],
            is_pinching: pinch_distance < self.config.pinch_threshold,
            is_visible: true,
        });
    }

    pub fn slot(&self) -> &HandStateSlot {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_tips(index: [f32; 2], thumb: [f32; 2]) -> LandmarkFrame {
        let mut points = vec![[0.0, 0.0]; 21];
        points[INDEX_FINGERTIP] = index;
        points[THUMB_TIP] = thumb;
        LandmarkFrame { points }
    }

    #[test]
    fn classifier_mirrors_x_and_keeps_y() {
        let slot = HandStateSlot::new();
        let classifier = GestureClassifier::new(slot.clone(), GestureConfig::default());

        classifier.ingest(Some(&frame_with_tips([0.3, 0.7], [0.9, 0.9])));

        let state = slot.snapshot();
        assert!(state.is_visible);
        assert!((state.x - 0.7).abs() < 1e-6);
        assert!((state.y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn pinch_is_thresholded_on_fingertip_distance() {
        let slot = HandStateSlot::new();
        let classifier = GestureClassifier::new(slot.clone(), GestureConfig::default());

        classifier.ingest(Some(&frame_with_tips([0.5, 0.5], [0.55, 0.5])));
        assert!(slot.snapshot().is_pinching);

        classifier.ingest(Some(&frame_with_tips([0.5, 0.5], [0.7, 0.5])));
        assert!(!slot.snapshot().is_pinching);
    }

    #[test]
    fn lost_hand_keeps_last_cursor_position() {
        let slot = HandStateSlot::new();
        let classifier = GestureClassifier::new(slot.clone(), GestureConfig::default());

        classifier.ingest(Some(&frame_with_tips([0.2, 0.4], [0.21, 0.4])));
        classifier.ingest(None);

        let state = slot.snapshot();
        assert!(!state.is_visible);
        assert!((state.x - 0.8).abs() < 1e-6);
        assert!((state.y - 0.4).abs() < 1e-6);
        assert!(state.is_pinching, "pinch flag persists while invisible");
    }

    #[test]
    fn malformed_frames_count_as_no_hand() {
        let slot = HandStateSlot::new();
        let classifier = GestureClassifier::new(slot.clone(), GestureConfig::default());

        classifier.ingest(Some(&frame_with_tips([0.2, 0.4], [0.21, 0.4])));

        // Too few points.
        classifier.ingest(Some(&LandmarkFrame {
            points: vec![[0.1, 0.1]; 3],
        }));
        assert!(!slot.snapshot().is_visible);

        // Non-finite coordinates.
        classifier.ingest(Some(&frame_with_tips([f32::NAN, 0.4], [0.2, 0.4])));
        assert!(!slot.snapshot().is_visible);
    }

    #[test]
    fn slot_replaces_whole_record() {
        let slot = HandStateSlot::new();
        slot.store(HandState {
            x: 0.1,
            y: 0.2,
            is_pinching: true,
            is_visible: true,
        });
        slot.store(HandState {
            x: 0.9,
            y: 0.8,
            is_pinching: false,
            is_visible: true,
        });

        let state = slot.snapshot();
        assert_eq!(state.x, 0.9);
        assert_eq!(state.y, 0.8);
        assert!(!state.is_pinching);
    }
}
