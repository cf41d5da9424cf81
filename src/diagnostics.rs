/*
 * Diagnostics Module
 *
 * This module records how the synchrony metric evolves over a run.
 * SyncTracker keeps a bounded history of samples taken from a World, which
 * the headless runner writes to its report and the viewer shows in its panel.
 */

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::world::World;

// Larger histories grow on demand instead of allocating up front
const PREALLOCATED_SAMPLES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncSample {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub deviation: f64,
    pub flashing: usize,
}

impl SyncSample {
    pub fn from_world(world: &World) -> Self {
        Self {
            tick: world.ticks(),
            elapsed_ms: world.elapsed_ms(),
            deviation: world.flash_deviation(),
            flashing: world.flashing_count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncTracker {
    samples: VecDeque<SyncSample>,
    capacity: usize,
}

impl SyncTracker {
    pub fn new(capacity: usize) -> Self {
        // A zero capacity would drop every sample
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(PREALLOCATED_SAMPLES)),
            capacity,
        }
    }

    pub fn record(&mut self, world: &World) -> SyncSample {
        let sample = SyncSample::from_world(world);
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        sample
    }

    pub fn latest(&self) -> Option<&SyncSample> {
        self.samples.back()
    }

    pub fn samples(&self) -> impl Iterator<Item = &SyncSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_deviation(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.deviation)
            .min_by(|a, b| a.total_cmp(b))
    }

    // Oldest deviation minus newest; positive while bugs converge
    pub fn improvement(&self) -> Option<f64> {
        let first = self.samples.front()?;
        let last = self.samples.back()?;
        Some(first.deviation - last.deviation)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bug::Bug;
    use crate::params::SimulationParams;
    use crate::vector::Vector2;

    fn world_with_timers(timers: &[f64]) -> World {
        let bugs = timers
            .iter()
            .enumerate()
            .map(|(i, &t)| Bug::new(i as u64, Vector2::new(400.0, 300.0), 0.5, t))
            .collect();
        let params = SimulationParams {
            seed: Some(5),
            ..SimulationParams::default()
        };
        World::from_bugs(params, 800.0, 600.0, bugs).unwrap()
    }

    #[test]
    fn empty_tracker_has_no_summary() {
        let tracker = SyncTracker::new(4);
        assert!(tracker.is_empty());
        assert!(tracker.latest().is_none());
        assert!(tracker.min_deviation().is_none());
        assert!(tracker.improvement().is_none());
    }

    #[test]
    fn oldest_samples_are_evicted() {
        let mut world = world_with_timers(&[1000.0, 2000.0, 3000.0]);
        let mut tracker = SyncTracker::new(3);

        for _ in 0..5 {
            world.tick(10.0);
            tracker.record(&world);
        }

        assert_eq!(tracker.len(), 3);
        let ticks: Vec<u64> = tracker.samples().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![3, 4, 5]);
        assert_eq!(tracker.latest().unwrap().elapsed_ms, 50.0);
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let world = world_with_timers(&[1000.0]);
        let mut tracker = SyncTracker::new(0);
        tracker.record(&world);
        tracker.record(&world);
        assert_eq!(tracker.capacity(), 1);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn huge_capacity_grows_on_demand() {
        let world = world_with_timers(&[1000.0, 2000.0]);
        let mut tracker = SyncTracker::new(usize::MAX);
        assert_eq!(tracker.capacity(), usize::MAX);

        for _ in 0..PREALLOCATED_SAMPLES + 10 {
            tracker.record(&world);
        }
        assert_eq!(tracker.len(), PREALLOCATED_SAMPLES + 10);
    }

    #[test]
    fn summary_reflects_recorded_deviation() {
        let spread = world_with_timers(&[0.0, 10.0, 20.0, 50.0]);
        let tight = world_with_timers(&[20.0, 20.0, 20.0, 20.0]);
        let mut tracker = SyncTracker::new(8);

        tracker.record(&spread);
        tracker.record(&tight);

        assert_eq!(tracker.min_deviation(), Some(0.0));
        let improvement = tracker.improvement().unwrap();
        assert!((improvement - 15f64.sqrt()).abs() < 1e-12);
    }
}
