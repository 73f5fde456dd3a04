use std::sync::Arc;

use imgui::Ui;

use crate::content::PlanetData;

/// Everything the overlay reads and writes each frame. The app owns this
/// and applies the mutations (slider, close button) after the draw.
pub struct OverlayState {
    pub selected: Option<Arc<PlanetData>>,
    pub time_speed: f32,
    pub hand_visible: bool,
    pub hovered: Option<String>,
    /// Set by the overlay when the info card's close button was pressed.
    pub close_requested: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            selected: None,
            time_speed: 1.0,
            hand_visible: false,
            hovered: None,
            close_requested: false,
        }
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn draw_overlay(ui: &Ui, state: &mut OverlayState) {
    ui.window("System Controls")
        .size([280.0, 130.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.slider("Time speed", 0.0, 3.0, &mut state.time_speed);
            ui.separator();

            let status = if state.hand_visible {
                "OPTICAL SENSORS: ONLINE"
            } else {
                "OPTICAL SENSORS: SEARCHING..."
            };
            ui.text(status);

            match &state.hovered {
                Some(name) => ui.text(format!("TARGET: {}", name.to_uppercase())),
                None => ui.text_disabled("TARGET: --"),
            }
        });

    if let Some(planet) = state.selected.clone() {
        ui.window(planet.name)
            .size([420.0, 320.0], imgui::Condition::FirstUseEver)
            .position([320.0, 10.0], imgui::Condition::FirstUseEver)
            .build(|| {
                ui.text_disabled(planet.description);
                ui.separator();
                ui.text(planet.content.title);
                ui.spacing();

                for item in planet.content.items {
                    ui.bullet_text(item);
                }

                if let Some(details) = planet.content.details {
                    ui.spacing();
                    ui.text_wrapped(details);
                }

                ui.spacing();
                if ui.button("Close") {
                    state.close_requested = true;
                }
            });
    }
}
