/*
 * Firefly Synchrony Simulation - Module Definitions
 *
 * This file defines the module structure for the firefly simulation.
 * The simulation core (vector, bug, world, params, diagnostics) has no
 * graphics dependency. The viewer modules are only built with the
 * `viewer` feature.
 */

// Re-export key components for easier access
pub use bug::{Bug, Transition};
pub use diagnostics::{SyncSample, SyncTracker};
pub use error::SimError;
pub use params::{ParamChanges, ParamSnapshot, SimulationParams};
pub use vector::Vector2;
pub use world::{Bounds, World};

// Define modules
pub mod bug;
pub mod diagnostics;
pub mod error;
pub mod params;
pub mod vector;
pub mod world;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod debug;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;
