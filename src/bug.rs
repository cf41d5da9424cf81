/*
 * Bug Module
 *
 * This module defines the Bug struct, a single firefly, and its behavior.
 * Each bug does two things every tick:
 * 1. Movement: wander toward a random goal with a little jitter
 * 2. Flashing: count its timer down and toggle between resting and flashing
 *
 * A bug only changes its own state here. Coupling with neighbors happens
 * in the world, which owns every bug.
 */

use rand::Rng;

use crate::params::SimulationParams;
use crate::vector::Vector2;
use crate::world::Bounds;

// Bugs wander a little past the visible surface, more on the near edges
const GOAL_PAD_NEAR: f64 = 5.0;
const GOAL_PAD_FAR: f64 = 4.0;

const SPEED_FACTOR_MIN: f64 = 0.85;
const SPEED_FACTOR_MAX: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StartedFlashing,
    StoppedFlashing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bug {
    id: u64,
    position: Vector2,
    goal: Option<Vector2>,
    speed: f64,
    flashing: bool,
    timer: f64,
}

impl Bug {
    pub fn new(id: u64, position: Vector2, speed: f64, timer: f64) -> Self {
        Self {
            id,
            position,
            goal: None,
            speed,
            flashing: false,
            timer,
        }
    }

    // Create a resting bug at a random spot with a random phase
    pub fn spawn<R: Rng + ?Sized>(
        id: u64,
        bounds: Bounds,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Self {
        let r = params.agent_radius;
        let position = Vector2::new(
            random_range(rng, r, bounds.width - r),
            random_range(rng, r, bounds.height - r),
        );

        // This bug's personal speed
        let speed = params.base_speed * random_range(rng, SPEED_FACTOR_MIN, SPEED_FACTOR_MAX);

        // Random phase so the population doesn't start in sync
        let timer = rng.gen::<f64>() * params.flash_cooldown;

        Self::new(id, position, speed, timer)
    }

    pub fn with_flashing(mut self, flashing: bool) -> Self {
        self.flashing = flashing;
        self
    }

    pub fn with_goal(mut self, goal: Vector2) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn goal(&self) -> Option<Vector2> {
        self.goal
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    // Move, then run the flash timer, for a bug driven outside a World.
    // Coupling is up to the caller when this returns StartedFlashing.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        bounds: Bounds,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Option<Transition> {
        self.move_toward_goal(bounds, params, rng);
        self.advance_timer(dt, params)
    }

    pub fn move_toward_goal<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        params: &SimulationParams,
        rng: &mut R,
    ) {
        let min_goal_dist = params.min_goal_distance();

        let goal = match self.goal {
            Some(goal) if self.position.distance(goal) > min_goal_dist => goal,
            _ => self.choose_goal(bounds, params, rng),
        };

        let mut jitter = Vector2::random(rng);
        jitter.subtract_scalar(0.5).divide_scalar(2.0);

        // Head for the goal at our own speed, jitter is per tick
        let mut movement = goal.copy();
        movement
            .subtract_vector(self.position)
            .normalize()
            .multiply_scalar(self.speed)
            .add_vector(jitter);

        self.position.add_vector(movement);
    }

    fn choose_goal<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Vector2 {
        let r = params.agent_radius;
        let min_goal_dist = params.min_goal_distance();

        let mut goal = self.position;
        while self.position.distance(goal) <= min_goal_dist {
            goal = Vector2::new(
                random_range(rng, -r * GOAL_PAD_NEAR, bounds.width + r * GOAL_PAD_FAR),
                random_range(rng, -r * GOAL_PAD_NEAR, bounds.height + r * GOAL_PAD_FAR),
            );
        }

        self.goal = Some(goal);
        goal
    }

    pub fn advance_timer(&mut self, dt: f64, params: &SimulationParams) -> Option<Transition> {
        self.timer -= dt;

        if self.timer > 0.0 {
            return None;
        }

        self.flashing = !self.flashing;
        if self.flashing {
            self.timer = params.flash_duration;
            log::trace!("bug {} started flashing", self.id);
            Some(Transition::StartedFlashing)
        } else {
            self.timer = params.flash_cooldown;
            Some(Transition::StoppedFlashing)
        }
    }

    // A neighbor fired; pull our next flash closer
    pub fn receive_flash(&mut self, decrement: f64) {
        self.timer -= decrement;
    }
}

// Uniform in [min, max); an inverted range samples from (max, min]
fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> SimulationParams {
        SimulationParams::default()
    }

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn spawn_respects_ranges() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(1);

        for id in 0..500 {
            let bug = Bug::spawn(id, bounds(), &params, &mut rng);
            let pos = bug.position();
            assert!(pos.x >= 3.0 && pos.x <= 797.0);
            assert!(pos.y >= 3.0 && pos.y <= 597.0);
            assert!(bug.speed() >= 0.5 * 0.85 && bug.speed() <= 0.5 * 1.15);
            assert!(bug.timer() >= 0.0 && bug.timer() <= 5000.0);
            assert!(!bug.is_flashing());
            assert!(bug.goal().is_none());
        }
    }

    #[test]
    fn new_goal_is_outside_min_distance() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(2);
        let mut bug = Bug::new(0, Vector2::new(400.0, 300.0), 0.5, 1000.0);

        for _ in 0..200 {
            let before = bug.position();
            let goal = bug.choose_goal(bounds(), &params, &mut rng);
            assert!(before.distance(goal) > params.min_goal_distance());
            assert!(goal.x >= -15.0 && goal.x <= 812.0);
            assert!(goal.y >= -15.0 && goal.y <= 612.0);
        }
    }

    #[test]
    fn reached_goal_is_replaced() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(3);
        let start = Vector2::new(100.0, 100.0);
        let near = Vector2::new(105.0, 100.0);
        let mut bug = Bug::new(0, start, 0.5, 1000.0).with_goal(near);

        bug.move_toward_goal(bounds(), &params, &mut rng);

        let goal = bug.goal().unwrap();
        assert_ne!(goal, near);
        assert!(start.distance(goal) > params.min_goal_distance());
    }

    #[test]
    fn far_goal_is_kept_and_approached() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(4);
        let goal = Vector2::new(500.0, 100.0);
        let mut bug = Bug::new(0, Vector2::new(100.0, 100.0), 1.0, 1000.0).with_goal(goal);

        let before = bug.position().distance(goal);
        bug.move_toward_goal(bounds(), &params, &mut rng);

        assert_eq!(bug.goal(), Some(goal));
        let after = bug.position().distance(goal);
        // speed 1.0 toward the goal, jitter at most 0.25 per axis
        assert!(after < before - 0.7);
        assert!(after > before - 1.3);
    }

    #[test]
    fn movement_is_speed_plus_bounded_jitter() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(5);
        let goal = Vector2::new(700.0, 300.0);
        let mut bug = Bug::new(0, Vector2::new(100.0, 300.0), 0.5, 1000.0).with_goal(goal);

        for _ in 0..100 {
            let before = bug.position();
            bug.move_toward_goal(bounds(), &params, &mut rng);
            let after = bug.position();
            let dx = after.x - before.x;
            let dy = after.y - before.y;
            // heading drifts slightly off the x axis as jitter accumulates
            assert!(dx > 0.2 && dx < 0.76, "dx = {}", dx);
            assert!(dy.abs() < 0.3, "dy = {}", dy);
        }
    }

    #[test]
    fn resting_bug_starts_flashing_at_zero() {
        let params = params();
        let mut bug = Bug::new(0, Vector2::zero(), 0.5, 10.0);

        assert_eq!(bug.advance_timer(5.0, &params), None);
        assert_eq!(bug.timer(), 5.0);

        assert_eq!(bug.advance_timer(5.0, &params), Some(Transition::StartedFlashing));
        assert!(bug.is_flashing());
        assert_eq!(bug.timer(), params.flash_duration);
    }

    #[test]
    fn flashing_bug_rests_after_duration() {
        let params = params();
        let mut bug = Bug::new(0, Vector2::zero(), 0.5, 20.0).with_flashing(true);

        assert_eq!(bug.advance_timer(30.0, &params), Some(Transition::StoppedFlashing));
        assert!(!bug.is_flashing());
        assert_eq!(bug.timer(), params.flash_cooldown);
    }

    #[test]
    fn step_moves_then_runs_the_timer() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(6);
        let goal = Vector2::new(500.0, 100.0);
        let mut bug = Bug::new(0, Vector2::new(100.0, 100.0), 1.0, 8.0).with_goal(goal);

        let before = bug.position();
        assert_eq!(bug.step(16.0, bounds(), &params, &mut rng), Some(Transition::StartedFlashing));
        assert_ne!(bug.position(), before);
        assert_eq!(bug.timer(), params.flash_duration);
    }

    #[test]
    fn received_flash_can_drive_timer_negative() {
        let mut bug = Bug::new(0, Vector2::zero(), 0.5, 30.0);
        bug.receive_flash(50.0);
        assert_eq!(bug.timer(), -20.0);
    }
}
