/*
 * Renderer Module
 *
 * This module draws the firefly simulation. It only reads world state.
 * The world uses canvas coordinates (origin top-left, y down), nannou
 * uses a centered origin with y up, so positions are mapped on the way out.
 *
 * With debug enabled, bug 0 is drawn with its coupling radius and a line
 * to its current goal.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;
use crate::vector::Vector2;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let params = model.world.params();
    let radius = params.agent_radius as f32;

    for bug in model.world.agents() {
        let color = if bug.is_flashing() { YELLOW } else { GRAY };
        draw.ellipse()
            .xy(to_screen(bug.position(), window_rect))
            .radius(radius)
            .color(color);
    }

    if params.show_debug {
        if let Some(first) = model.world.get(0) {
            let pos = to_screen(first.position(), window_rect);

            // Coupling radius
            draw.ellipse()
                .xy(pos)
                .radius(params.flash_coupling_radius as f32)
                .no_fill()
                .stroke(WHITE)
                .stroke_weight(1.0);

            // Goal
            if let Some(goal) = first.goal() {
                draw.line()
                    .start(pos)
                    .end(to_screen(goal, window_rect))
                    .color(RED)
                    .weight(1.0);
            }
        }

        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.world.len());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw controls: {:?}", err);
    }
}

fn to_screen(pos: Vector2, window_rect: Rect) -> Point2 {
    pt2(
        window_rect.left() + pos.x as f32,
        window_rect.top() - pos.y as f32,
    )
}
