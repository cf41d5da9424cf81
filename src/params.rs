/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the firefly simulation. The defaults reproduce the
 * reference behavior. Parameters can be loaded from and saved to JSON, and
 * the viewer edits them through its control panel, using a ParamSnapshot
 * taken before the panel runs to detect what changed between frames.
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub population: usize,
    pub base_speed: f64,
    pub agent_radius: f64,
    pub flash_coupling_radius: f64,
    // Milliseconds spent flashing
    pub flash_duration: f64,
    // Milliseconds spent resting between flashes
    pub flash_cooldown: f64,
    // Milliseconds removed from a resting neighbor's timer when a bug fires
    pub coupling_decrement: f64,
    pub seed: Option<u64>,
    pub show_debug: bool,
    pub pause_simulation: bool,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSnapshot {
    population: usize,
    base_speed: f64,
    agent_radius: f64,
    flash_coupling_radius: f64,
    flash_duration: f64,
    flash_cooldown: f64,
    coupling_decrement: f64,
    show_debug: bool,
    pause_simulation: bool,
}

// Which parameters changed since the last snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamChanges {
    // Population and speed are fixed per world, so these need a fresh world
    pub needs_reset: bool,
    pub any_changed: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            population: 1000,
            base_speed: 0.5,
            agent_radius: 3.0,
            flash_coupling_radius: 100.0,
            flash_duration: 500.0,
            flash_cooldown: 5000.0,
            coupling_decrement: 50.0,
            seed: None,
            show_debug: false,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    // Goals closer than this count as reached
    pub fn min_goal_distance(&self) -> f64 {
        self.agent_radius * 3.0
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive_finite("base_speed", self.base_speed, true)?;
        positive_finite("agent_radius", self.agent_radius, false)?;
        positive_finite("flash_coupling_radius", self.flash_coupling_radius, true)?;
        positive_finite("flash_duration", self.flash_duration, false)?;
        positive_finite("flash_cooldown", self.flash_cooldown, false)?;
        positive_finite("coupling_decrement", self.coupling_decrement, true)?;
        Ok(())
    }

    pub fn load_from_disk(path: &Path) -> Result<Self, SimError> {
        let data = fs::read_to_string(path)?;
        let params: SimulationParams = serde_json::from_str(&data)?;
        params.validate()?;
        Ok(params)
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<(), SimError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_population_range() -> std::ops::RangeInclusive<usize> {
        2..=3000
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f64> {
        0.0..=5.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f64> {
        1.0..=10.0
    }

    pub fn get_coupling_radius_range() -> std::ops::RangeInclusive<f64> {
        0.0..=400.0
    }

    pub fn get_duration_range() -> std::ops::RangeInclusive<f64> {
        50.0..=2000.0
    }

    pub fn get_cooldown_range() -> std::ops::RangeInclusive<f64> {
        500.0..=20000.0
    }

    pub fn get_decrement_range() -> std::ops::RangeInclusive<f64> {
        0.0..=500.0
    }
}

impl ParamSnapshot {
    // Take a snapshot of current parameter values
    pub fn of(params: &SimulationParams) -> Self {
        Self {
            population: params.population,
            base_speed: params.base_speed,
            agent_radius: params.agent_radius,
            flash_coupling_radius: params.flash_coupling_radius,
            flash_duration: params.flash_duration,
            flash_cooldown: params.flash_cooldown,
            coupling_decrement: params.coupling_decrement,
            show_debug: params.show_debug,
            pause_simulation: params.pause_simulation,
        }
    }

    // Compare the current values against this snapshot
    pub fn changes(&self, params: &SimulationParams) -> ParamChanges {
        let needs_reset = params.population != self.population
            || params.base_speed != self.base_speed;

        ParamChanges {
            needs_reset,
            any_changed: ParamSnapshot::of(params) != *self,
        }
    }
}

fn positive_finite(field: &'static str, value: f64, allow_zero: bool) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(field, format!("must be finite, got {value}")));
    }
    if value < 0.0 || (!allow_zero && value == 0.0) {
        let bound = if allow_zero { "non-negative" } else { "positive" };
        return Err(SimError::invalid(field, format!("must be {bound}, got {value}")));
    }
    Ok(())
}
