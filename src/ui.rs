/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for the simulation parameters and
 * reports the synchrony metric. Changes are detected against a snapshot
 * taken before the panel runs.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::diagnostics::SyncTracker;
use crate::params::{ParamChanges, ParamSnapshot, SimulationParams};

// Update the UI and return whether the reset button was clicked and which
// parameters changed this frame
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    tracker: &SyncTracker,
) -> (bool, ParamChanges) {
    let mut should_reset = false;

    let snapshot = ParamSnapshot::of(params);

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.population, SimulationParams::get_population_range()).text("Number of Bugs"));
                ui.add(egui::Slider::new(&mut params.base_speed, SimulationParams::get_speed_range()).text("Base Speed"));
                ui.add(egui::Slider::new(&mut params.agent_radius, SimulationParams::get_radius_range()).text("Bug Radius"));

                if ui.button("Reset Bugs").clicked() {
                    should_reset = true;
                }
            });

            ui.collapsing("Flashing", |ui| {
                ui.add(egui::Slider::new(&mut params.flash_duration, SimulationParams::get_duration_range()).text("Flash Duration (ms)"));
                ui.add(egui::Slider::new(&mut params.flash_cooldown, SimulationParams::get_cooldown_range()).text("Cooldown (ms)"));
                ui.add(egui::Slider::new(&mut params.flash_coupling_radius, SimulationParams::get_coupling_radius_range()).text("Coupling Radius"));
                ui.add(egui::Slider::new(&mut params.coupling_decrement, SimulationParams::get_decrement_range()).text("Coupling Nudge (ms)"));
            });

            ui.collapsing("Synchrony", |ui| {
                ui.label(format!("Flash deviation: {:.2}", debug_info.flash_deviation));
                ui.label(format!("Flashing bugs: {}", debug_info.flashing_bugs));
                if let Some(best) = tracker.min_deviation() {
                    ui.label(format!("Lowest recent deviation: {:.2}", best));
                }
                if let Some(improvement) = tracker.improvement() {
                    ui.label(format!("Change over history: {:+.2}", -improvement));
                }
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (should_reset, snapshot.changes(params))
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    bugs_len: usize,
) {
    // Create a background panel in the top-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Bugs: {}", bugs_len),
        format!("Flashing: {}", debug_info.flashing_bugs),
        format!("Deviation: {:.2}", debug_info.flash_deviation),
        format!("Ticks: {}", debug_info.ticks),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
