//! Drives the gesture pipeline from a synthetic landmark feed instead of a
//! camera, so the pinch interaction can be exercised without any tracking
//! hardware. A background thread sweeps a fake hand across the view and
//! periodically pinches.

use std::thread;
use std::time::Duration;

use orrery::LandmarkFrame;

/// MediaPipe hand frames carry 21 landmarks.
const LANDMARK_COUNT: usize = 21;

fn synthetic_frame(t: f32, pinching: bool) -> LandmarkFrame {
    let index = [0.5 + 0.35 * (0.4 * t).sin(), 0.5 + 0.25 * (0.7 * t).cos()];
    // Thumb either touches the index tip or hangs well clear of it.
    let offset = if pinching { 0.01 } else { 0.3 };
    let thumb = [index[0] + offset, index[1]];

    let mut points = vec![[0.5_f32, 0.5_f32]; LANDMARK_COUNT];
    points[orrery::control::hand::INDEX_FINGERTIP] = index;
    points[orrery::control::hand::THUMB_TIP] = thumb;
    LandmarkFrame { points }
}

fn main() -> anyhow::Result<()> {
    let mut app = orrery::default();

    app.set_on_select(|planet| println!("selected {}", planet.name));
    app.set_on_hover_change(|name| match name {
        Some(name) => println!("hovering {name}"),
        None => println!("hover cleared"),
    });

    let classifier = app.hand_input();
    thread::spawn(move || {
        let mut t = 0.0_f32;
        loop {
            // Pinch for half a second out of every three.
            let pinching = t % 3.0 > 2.5;
            classifier.ingest(Some(&synthetic_frame(t, pinching)));
            t += 1.0 / 60.0;
            thread::sleep(Duration::from_millis(16));
        }
    });

    app.run()
}
