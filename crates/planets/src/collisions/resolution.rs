//! Collision resolution through inelastic mergers
//!
//! A merger conserves:
//! - Total mass: m = m_a + m_b
//! - Momentum: p = p_a + p_b
//! - Disk area: r² = r_a² + r_b²

use std::collections::HashSet;

use crate::body::{Body, BodyId};
use crate::collisions::CollisionEvent;
use crate::diagnostics::Diagnostic;
use crate::geometry;
use crate::world::World;

/// Outcome of one merger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merger {
    pub survivor: BodyId,
    pub absorbed: BodyId,
    pub merged: BodyId,
}

/// Merge `b` into `a`
///
/// The result sits at the mass-weighted centroid, moves with the combined
/// momentum, keeps `a`'s colour and starts with an empty trail.
///
/// # Examples
///
/// ```
/// use planets::body::{Body, BodyId, Rgb};
/// use planets::collisions::merge_bodies;
/// use nalgebra::{Point2, Vector2};
///
/// let red = Rgb::new(255, 0, 0);
/// let a = Body::new(BodyId(0), "a", 1.0, 3.0, Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0), red);
/// let b = Body::new(BodyId(1), "b", 1.0, 4.0, Point2::new(2.0, 0.0), Vector2::new(0.0, 3.0), red);
///
/// let merged = merge_bodies(&a, &b, BodyId(2));
///
/// assert_eq!(merged.name, "a+b");
/// assert!((merged.mass - 2.0).abs() < 1e-12);
/// assert!((merged.radius - 5.0).abs() < 1e-12);
///
/// let p = a.momentum() + b.momentum();
/// assert!((merged.momentum() - p).magnitude() < 1e-12);
/// ```
pub fn merge_bodies(a: &Body, b: &Body, id: BodyId) -> Body {
    let mass = a.mass + b.mass;
    let position = geometry::weighted_centroid(a.position, a.mass, b.position, b.mass);
    let velocity = geometry::weighted_average(a.velocity, a.mass, b.velocity, b.mass);
    let radius = (a.radius.powi(2) + b.radius.powi(2)).sqrt();

    Body::new(
        id,
        format!("{}+{}", a.name, b.name),
        mass,
        radius,
        position,
        velocity,
        a.color,
    )
}

/// Merge the body in slot `j` into the body in slot `i`
///
/// The merged body takes over slot `i`; slot `j` is left empty. Returns
/// `None` without touching anything if either slot is already empty or
/// `i == j`, so a pair that went stale earlier in the tick is harmless.
///
/// # Arguments
/// * `world` - World owning both slots; also receives the `Merged` diagnostic
/// * `i` - Slot of the survivor, whose name comes first and colour is kept
/// * `j` - Slot of the absorbed body
///
/// # Returns
/// The ids involved, with `merged` freshly allocated, or `None` for a stale pair
pub fn merge_slots(world: &mut World, i: usize, j: usize) -> Option<Merger> {
    if i == j || world.slot(i).is_none() || world.slot(j).is_none() {
        return None;
    }
    let a = world.take_slot(i)?;
    let b = world.take_slot(j)?;

    let id = world.allocate_id();
    let merged = merge_bodies(&a, &b, id);

    world.diagnostics_mut().push(Diagnostic::Merged {
        survivor: a.name.clone(),
        absorbed: b.name.clone(),
        merged_id: id,
        merged_name: merged.name.clone(),
        mass: merged.mass,
    });
    world.put_slot(i, merged);

    Some(Merger {
        survivor: a.id,
        absorbed: b.id,
        merged: id,
    })
}

/// Resolve a batch of events in order
///
/// Each body takes part in at most one merger; later events naming a body
/// that has already merged, or that no longer exists, are skipped.
/// Empty slots are compacted before returning.
///
/// # Arguments
/// * `world` - World the events were detected in; slot indices must still match
/// * `events` - Detected contacts, resolved front to back
///
/// # Returns
/// One [`Merger`] per event that was applied, in event order
pub fn resolve_collisions(world: &mut World, events: &[CollisionEvent]) -> Vec<Merger> {
    let mut consumed: HashSet<BodyId> = HashSet::new();
    let mut mergers = Vec::new();

    for event in events {
        if consumed.contains(&event.body_a) || consumed.contains(&event.body_b) {
            continue;
        }
        let (Some(i), Some(j)) = (world.slot_of(event.body_a), world.slot_of(event.body_b)) else {
            continue;
        };
        if let Some(merger) = merge_slots(world, i, j) {
            consumed.insert(merger.survivor);
            consumed.insert(merger.absorbed);
            consumed.insert(merger.merged);
            mergers.push(merger);
        }
    }

    world.compact();
    mergers
}
