/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains frame metrics
 * and synchrony figures to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Flash deviation and number of flashing bugs
 * - Simulation ticks so far
 */

use std::time::Duration;

use crate::world::World;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub flash_deviation: f64,
    pub flashing_bugs: usize,
    pub ticks: u64,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            flash_deviation: 0.0,
            flashing_bugs: 0,
            ticks: 0,
        }
    }
}

impl DebugInfo {
    // Refresh the simulation figures after a tick
    pub fn observe(&mut self, world: &World) {
        self.flash_deviation = world.flash_deviation();
        self.flashing_bugs = world.flashing_count();
        self.ticks = world.ticks();
    }
}
