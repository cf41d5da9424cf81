/*
 * Vector Module
 *
 * This module defines Vector2, the arithmetic primitive used for bug
 * positions, goals and movement deltas.
 *
 * Every mutating operation works in place on the receiver and returns it
 * so calls can be chained. Copy first when the original value is needed:
 *
 *     let mut step = goal.copy();
 *     step.subtract_vector(position).normalize().multiply_scalar(speed);
 *
 * Degenerate values are kept, never clamped: dividing by zero produces
 * non-finite components. Normalizing a zero-length vector leaves it at zero.
 */

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    // Both components uniform in [0, 1)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen::<f64>();
        let y = rng.gen::<f64>();
        Self { x, y }
    }

    pub fn multiply_scalar(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    pub fn multiply_vector(&mut self, other: Vector2) -> &mut Self {
        self.x *= other.x;
        self.y *= other.y;
        self
    }

    pub fn divide_scalar(&mut self, s: f64) -> &mut Self {
        self.x /= s;
        self.y /= s;
        self
    }

    pub fn add_scalar(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self
    }

    pub fn add_vector(&mut self, other: Vector2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn subtract_scalar(&mut self, s: f64) -> &mut Self {
        self.x -= s;
        self.y -= s;
        self
    }

    pub fn subtract_vector(&mut self, other: Vector2) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn distance(&self, other: Vector2) -> f64 {
        let a = self.x - other.x;
        let b = self.y - other.y;
        (a * a + b * b).sqrt()
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    // Scale to unit length; a zero vector stays zero
    pub fn normalize(&mut self) -> &mut Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return self;
        }
        self.divide_scalar(mag)
    }

    pub fn copy(&self) -> Vector2 {
        *self
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
