//! 2D point and vector helpers
//!
//! Simulation space is measured in meters. Render space is what the UI draws:
//! positions relative to a reference point, divided by the distance scale.

use nalgebra::{Point2, Vector2};

/// Euclidean distance between two points
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Mass-weighted centroid of two points
///
/// # Examples
///
/// ```
/// use planets::geometry::weighted_centroid;
/// use nalgebra::Point2;
///
/// let c = weighted_centroid(Point2::new(0.0, 0.0), 1.0, Point2::new(3.0, 0.0), 2.0);
/// assert!((c.x - 2.0).abs() < 1e-12);
/// ```
pub fn weighted_centroid(a: Point2<f64>, mass_a: f64, b: Point2<f64>, mass_b: f64) -> Point2<f64> {
    Point2::from((a.coords * mass_a + b.coords * mass_b) / (mass_a + mass_b))
}

/// Mass-weighted average of two vectors
pub fn weighted_average(
    a: Vector2<f64>,
    mass_a: f64,
    b: Vector2<f64>,
    mass_b: f64,
) -> Vector2<f64> {
    (a * mass_a + b * mass_b) / (mass_a + mass_b)
}

/// Converts a simulation position (meters) to render units relative to `origin`
pub fn to_render(position: &Point2<f64>, origin: &Point2<f64>, scale: f64) -> Point2<f64> {
    Point2::from((position - origin) / scale)
}

/// Inverse of [`to_render`]
pub fn from_render(point: &Point2<f64>, origin: &Point2<f64>, scale: f64) -> Point2<f64> {
    origin + point.coords * scale
}
