//! Brute-force O(N²) contact detection

use crate::body::{Body, BodyId};
use crate::world::World;

/// A detected contact between two bodies
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Earlier body in collection order; survives the merge
    pub body_a: BodyId,
    /// Later body; absorbed by the merge
    pub body_b: BodyId,
    /// Current separation (m)
    pub separation: f64,
    /// Sum of radii scaled to meters
    pub contact_distance: f64,
}

/// Whether `a` and `b` touch
///
/// The comparison is inclusive: bodies exactly at contact distance collide.
///
/// # Examples
///
/// ```
/// use planets::body::{Body, BodyId, Rgb};
/// use planets::collisions::touching;
/// use nalgebra::{Point2, Vector2};
///
/// let white = Rgb::new(255, 255, 255);
/// let a = Body::new(BodyId(0), "a", 1.0, 2.0, Point2::new(0.0, 0.0), Vector2::zeros(), white);
/// let b = Body::new(BodyId(1), "b", 1.0, 3.0, Point2::new(5.0e9, 0.0), Vector2::zeros(), white);
///
/// assert!(touching(&a, &b, 1.0e9));
/// assert!(!touching(&a, &b, 0.9e9));
/// ```
pub fn touching(a: &Body, b: &Body, distance_scale: f64) -> bool {
    a.distance_to(b) <= (a.radius + b.radius) * distance_scale
}

/// Checks one pair, returning the event if they touch
pub fn check_pair(a: &Body, b: &Body, distance_scale: f64) -> Option<CollisionEvent> {
    if a.id == b.id {
        return None;
    }
    let separation = a.distance_to(b);
    let contact_distance = (a.radius + b.radius) * distance_scale;

    (separation <= contact_distance).then(|| CollisionEvent {
        body_a: a.id,
        body_b: b.id,
        separation,
        contact_distance,
    })
}

/// Every touching pair in the world, ordered by the first body's position in
/// the collection and then the second's
pub fn detect_collisions(world: &World) -> Vec<CollisionEvent> {
    let scale = world.config().distance_scale;
    let bodies: Vec<&Body> = world.bodies().collect();

    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..]
                .iter()
                .filter_map(move |b| check_pair(a, b, scale))
        })
        .collect()
}
