/*
 * Application Module
 *
 * This module defines the viewer's application model. It hosts a World,
 * drives one tick per frame with the wall-clock time since the previous
 * frame, forwards window resizes to the world, and rebuilds the world when
 * the control panel changes the population.
 */

use std::path::Path;

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::diagnostics::SyncTracker;
use crate::params::SimulationParams;
use crate::renderer;
use crate::ui;
use crate::world::World;

// About ten seconds of frames at 60 fps
const HISTORY_SAMPLES: usize = 600;

// Main model for the application
pub struct Model {
    pub world: World,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub tracker: SyncTracker,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Window is 80% of the primary monitor when there is one
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = app
        .new_window()
        .title("Firefly Synchrony")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the main window");

    let window = app
        .window(window_id)
        .expect("main window closed during setup");
    let egui = Egui::from_window(&window);

    // Optional parameter file as the first argument
    let params = match std::env::args().nth(1) {
        Some(path) => SimulationParams::load_from_disk(Path::new(&path)).unwrap_or_else(|err| {
            log::warn!("using default parameters, could not load {}: {}", path, err);
            SimulationParams::default()
        }),
        None => SimulationParams::default(),
    };

    let rect = window.rect();
    let world = build_world(&params, rect.w(), rect.h());

    Model {
        world,
        params,
        egui,
        debug_info: DebugInfo::default(),
        tracker: SyncTracker::new(HISTORY_SAMPLES),
    }
}

fn build_world(params: &SimulationParams, width: f32, height: f32) -> World {
    World::new(params.clone(), width as f64, height as f64).unwrap_or_else(|err| {
        log::error!("invalid parameters, falling back to defaults: {}", err);
        World::new(SimulationParams::default(), width as f64, height as f64)
            .expect("default parameters are valid")
    })
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let (should_reset, changes) = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        &model.tracker,
    );

    if should_reset || changes.needs_reset {
        let bounds = model.world.bounds();
        model.world = build_world(&model.params, bounds.width as f32, bounds.height as f32);
        model.tracker.clear();
    } else if changes.any_changed {
        if let Err(err) = model.world.set_params(model.params.clone()) {
            log::warn!("rejected parameter change: {}", err);
        }
    }

    if !model.params.pause_simulation {
        let dt = update.since_last.as_secs_f64() * 1000.0;
        model.world.tick(dt);
        model.tracker.record(&model.world);
    }

    model.debug_info.observe(&model.world);
}

// Window resize event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.world.resize(size.x as f64, size.y as f64);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
