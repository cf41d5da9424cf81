/*
 * Firefly Synchrony Viewer
 *
 * This application shows a swarm of fireflies that wander the window and
 * blink. Whenever a bug flashes it nudges its resting neighbors to flash a
 * little sooner, and over time the swarm falls into step.
 *
 * Pass a JSON parameter file as the first argument to override the defaults.
 * The control panel adjusts the parameters in real time.
 */

use fireflies::app;

fn main() {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
