//! Minimal run of the solar system with mouse controls only.
//!
//! Click a planet to open its info card, click a satellite to launch it.
//! Left drag orbits the camera, scroll zooms.

fn main() -> anyhow::Result<()> {
    let mut app = orrery::default();

    app.set_on_select(|planet| {
        println!("focused: {} ({})", planet.name, planet.content.title);
    });
    app.set_on_launch(|| {
        println!("probe away!");
    });

    app.run()
}
