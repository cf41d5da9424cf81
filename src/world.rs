/*
 * World Module
 *
 * This module defines the World, which owns every bug, the surface bounds,
 * the parameters and the random source. It advances the bugs one tick at a
 * time and applies flash coupling between neighbors.
 *
 * Update order matters. Bugs are stepped in creation order, and a bug that
 * starts flashing immediately pulls forward the timers of its resting
 * neighbors, including bugs that have not been stepped yet this tick.
 * Changing the order changes the emergent timing, so the loop stays
 * sequential and neighbors are found with a full pairwise scan.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bug::{Bug, Transition};
use crate::error::SimError;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<(), SimError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SimError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }
}

pub struct World {
    bugs: Vec<Bug>,
    bounds: Bounds,
    params: SimulationParams,
    rng: StdRng,
    elapsed_ms: f64,
    ticks: u64,
}

impl World {
    // Populate a world with params.population randomly placed bugs
    pub fn new(params: SimulationParams, width: f64, height: f64) -> Result<Self, SimError> {
        params.validate()?;
        let bounds = Bounds::new(width, height);
        bounds.validate()?;

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut world = Self {
            bugs: Vec::with_capacity(params.population),
            bounds,
            params,
            rng,
            elapsed_ms: 0.0,
            ticks: 0,
        };

        for id in 0..world.params.population as u64 {
            let bug = Bug::spawn(id, world.bounds, &world.params, &mut world.rng);
            world.bugs.push(bug);
        }

        log::debug!(
            "created world with {} bugs on {}x{} (seed {:?})",
            world.bugs.len(),
            width,
            height,
            world.params.seed
        );

        Ok(world)
    }

    // Build a world around bugs created elsewhere, kept in the given order.
    // The population parameter is set to the number of bugs supplied.
    pub fn from_bugs(
        mut params: SimulationParams,
        width: f64,
        height: f64,
        bugs: Vec<Bug>,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let bounds = Bounds::new(width, height);
        bounds.validate()?;

        let mut ids: Vec<u64> = bugs.iter().map(Bug::id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(SimError::DuplicateBugId(pair[0]));
        }

        params.population = bugs.len();
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            bugs,
            bounds,
            params,
            rng,
            elapsed_ms: 0.0,
            ticks: 0,
        })
    }

    // Advance every bug by one frame of dt milliseconds
    pub fn tick(&mut self, dt: f64) {
        let bounds = self.bounds;
        for index in 0..self.bugs.len() {
            self.bugs[index].move_toward_goal(bounds, &self.params, &mut self.rng);
            self.handle_flashing(index, dt);
        }

        self.elapsed_ms += dt;
        self.ticks += 1;
    }

    // Run one bug's flash timer, broadcasting to its neighbors if it fired.
    // An index past the end is a no-op.
    pub fn handle_flashing(&mut self, index: usize, dt: f64) -> Option<Transition> {
        let transition = self.bugs.get_mut(index)?.advance_timer(dt, &self.params);

        if transition == Some(Transition::StartedFlashing) {
            self.flash_neighbors(index);
        }

        transition
    }

    fn flash_neighbors(&mut self, index: usize) {
        let decrement = self.params.coupling_decrement;
        for other in self.neighbors(index) {
            let neighbor = &mut self.bugs[other];
            if !neighbor.is_flashing() {
                neighbor.receive_flash(decrement);
            }
        }
    }

    // Indices of every other bug within the coupling radius, in creation order.
    // Empty for an index past the end.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let Some(me) = self.bugs.get(index) else {
            return Vec::new();
        };
        let position = me.position();
        let radius = self.params.flash_coupling_radius;

        self.bugs
            .iter()
            .enumerate()
            .filter(|(_, other)| other.id() != me.id() && position.distance(other.position()) <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    // New bounds apply to the next goal each bug picks
    pub fn resize(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }

        self.bounds = Bounds::new(width.max(0.0), height.max(0.0));
        log::debug!("world resized to {}x{}", self.bounds.width, self.bounds.height);
    }

    // Square root of the mean absolute deviation of all timers.
    // Trends toward zero as the population synchronizes.
    pub fn flash_deviation(&self) -> f64 {
        if self.bugs.is_empty() {
            return 0.0;
        }

        let n = self.bugs.len() as f64;
        let mean = self.bugs.iter().map(Bug::timer).sum::<f64>() / n;
        let mean_abs_dev = self
            .bugs
            .iter()
            .map(|bug| (bug.timer() - mean).abs())
            .sum::<f64>()
            / n;

        mean_abs_dev.sqrt()
    }

    pub fn flashing_count(&self) -> usize {
        self.bugs.iter().filter(|bug| bug.is_flashing()).count()
    }

    pub fn agents(&self) -> &[Bug] {
        &self.bugs
    }

    pub fn get(&self, id: u64) -> Option<&Bug> {
        self.bugs.iter().find(|bug| bug.id() == id)
    }

    pub fn len(&self) -> usize {
        self.bugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bugs.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    // Swap in new tuning mid-run. Population and seed belong to the
    // bugs already created, so those two are kept.
    pub fn set_params(&mut self, mut params: SimulationParams) -> Result<(), SimError> {
        params.validate()?;
        params.population = self.params.population;
        params.seed = self.params.seed;
        self.params = params;
        Ok(())
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
