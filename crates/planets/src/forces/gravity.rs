//! Direct pairwise gravity

use nalgebra::Vector2;

use crate::body::Body;
use crate::forces::{G, MIN_SEPARATION};

/// Pairwise gravity between two bodies
///
/// The distance used in the force law is clamped to `min_separation` so
/// near-coincident bodies do not receive an unbounded kick.
///
/// # Examples
///
/// ```
/// use planets::body::{Body, BodyId, Rgb};
/// use planets::forces::Gravity;
/// use nalgebra::{Point2, Vector2};
///
/// let gravity = Gravity::default();
/// let a = Body::new(BodyId(0), "a", 1.0e24, 1.0, Point2::new(0.0, 0.0), Vector2::zeros(), Rgb::new(255, 255, 255));
/// let b = Body::new(BodyId(1), "b", 1.0e24, 1.0, Point2::new(1.0e11, 0.0), Vector2::zeros(), Rgb::new(255, 255, 255));
///
/// // a is pulled toward b (positive x)
/// let accel = gravity.acceleration(&a, &b);
/// assert!(accel.x > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub constant: f64,
    pub min_separation: f64,
}

impl Gravity {
    pub fn new(constant: f64, min_separation: f64) -> Self {
        Self {
            constant,
            min_separation,
        }
    }

    /// Force that `a` experiences from `b` (N)
    pub fn force(&self, a: &Body, b: &Body) -> Vector2<f64> {
        let displacement = b.position - a.position;
        let distance = displacement.magnitude().max(self.min_separation);
        let magnitude = self.constant * a.mass * b.mass / (distance * distance);

        let angle = displacement.y.atan2(displacement.x);
        Vector2::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    /// Acceleration that `a` experiences from `b` (m/s²)
    pub fn acceleration(&self, a: &Body, b: &Body) -> Vector2<f64> {
        self.force(a, b) / a.mass
    }

    /// Pairwise potential energy of `a` and `b` (J), using the same clamp
    pub fn potential_energy(&self, a: &Body, b: &Body) -> f64 {
        let distance = a.distance_to(b).max(self.min_separation);
        -self.constant * a.mass * b.mass / distance
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(G, MIN_SEPARATION)
    }
}
