use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::forces::Gravity;
use crate::geometry;
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display colour carried for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ffcc00`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub mass: f64,              // kg
    pub radius: f64,            // render units, scaled by distance_scale for contact tests
    pub position: Point2<f64>,  // m
    pub velocity: Vector2<f64>, // m/s
    pub color: Rgb,
    pub trail: Trail,
}

impl Body {
    /// Creates a body with an empty trail
    ///
    /// # Examples
    ///
    /// ```
    /// use planets::body::{Body, BodyId, Rgb};
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let earth = Body::new(
    ///     BodyId(0),
    ///     "Earth",
    ///     5.972e24,
    ///     5.0,
    ///     Point2::new(1.496e11, 0.0),
    ///     Vector2::new(0.0, 29_780.0),
    ///     Rgb::new(80, 140, 255),
    /// );
    ///
    /// assert!(earth.trail.is_empty());
    /// ```
    pub fn new(
        id: BodyId,
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Rgb,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
            color,
            trail: Trail::new(),
        }
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        geometry::distance(&self.position, &other.position)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Accumulates the pull of `other` into this body's velocity over `dt`
    ///
    /// Only `self` changes; the caller visits the reverse pair separately.
    pub fn apply_gravity(&mut self, other: &Body, gravity: &Gravity, dt: f64) {
        self.velocity += gravity.acceleration(self, other) * dt;
    }

    /// Moves the body along its current velocity
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Records the current position and fades older trail points
    pub fn update_trail(&mut self, fade: f64) {
        self.trail.record(self.position, fade);
    }
}
