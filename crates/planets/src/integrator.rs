//! Time integration
//!
//! One tick runs in a fixed order:
//!
//! 1. Gravity: every body accumulates velocity from every other live body
//! 2. Collisions: touching bodies merge, at most one merger per body per tick
//! 3. Drift: surviving bodies move along their velocity
//! 4. Trails: each body records its new position and older points fade
//!
//! Steps 1 and 2 may be interleaved per pair, but no body moves until all of
//! them are done.

use std::collections::HashSet;

use nalgebra::Vector2;

use crate::body::BodyId;
use crate::collisions::{self, Merger};
use crate::config::PairingMode;
use crate::world::World;

/// A time integrator for the world
pub trait Integrator {
    /// Advance the world by one tick of `world.time_step()` seconds
    ///
    /// Returns the mergers that happened during the tick.
    fn step(&self, world: &mut World) -> Vec<Merger>;

    /// Advance the world by `n_ticks` ticks
    ///
    /// # Returns
    ///
    /// Elapsed simulated time after the last tick
    fn integrate(&self, world: &mut World, n_ticks: usize) -> f64 {
        for _ in 0..n_ticks {
            self.step(world);
        }
        world.elapsed()
    }
}

/// Semi-implicit (symplectic) Euler
///
/// Velocities are updated from forces at the current positions, then
/// positions are advanced with the new velocities.
///
/// # Examples
///
/// ```
/// use planets::integrator::{Integrator, SemiImplicitEuler};
/// use planets::presets;
/// use planets::world::World;
///
/// let mut world = World::default();
/// presets::spawn_preset(&mut world, "solar").unwrap();
///
/// let integrator = SemiImplicitEuler::new(world.config().pairing);
/// integrator.step(&mut world);
///
/// assert_eq!(world.elapsed(), world.time_step());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler {
    pub pairing: PairingMode,
}

impl SemiImplicitEuler {
    pub fn new(pairing: PairingMode) -> Self {
        Self { pairing }
    }

    /// Bodies take turns; each pulls from every other live body and merges
    /// with the first one it touches
    fn sequential_pass(&self, world: &mut World, dt: f64) -> Vec<Merger> {
        let scale = world.config().distance_scale;
        let gravity = *world.gravity();
        let n = world.slot_count();

        let mut merged: HashSet<BodyId> = HashSet::new();
        let mut mergers = Vec::new();

        for i in 0..n {
            for j in 0..n {
                let Some((a, b)) = world.pair_mut(i, j) else {
                    continue;
                };
                if merged.contains(&a.id) {
                    break;
                }
                a.apply_gravity(b, &gravity, dt);

                if merged.contains(&b.id) || !collisions::touching(a, b, scale) {
                    continue;
                }
                if let Some(merger) = collisions::merge_slots(world, i, j) {
                    merged.insert(merger.survivor);
                    merged.insert(merger.absorbed);
                    merged.insert(merger.merged);
                    mergers.push(merger);
                }
            }
        }

        mergers
    }

    /// All accelerations come from one snapshot; collisions are resolved
    /// afterwards in collection order
    fn simultaneous_pass(&self, world: &mut World, dt: f64) -> Vec<Merger> {
        let gravity = *world.gravity();

        let accelerations: Vec<Vector2<f64>> = world
            .bodies()
            .map(|a| {
                world
                    .bodies()
                    .filter(|b| b.id != a.id)
                    .map(|b| gravity.acceleration(a, b))
                    .fold(Vector2::zeros(), |acc, g| acc + g)
            })
            .collect();

        (0..world.slot_count())
            .zip(accelerations)
            .for_each(|(idx, accel)| {
                if let Some(body) = world.slot_mut(idx) {
                    body.velocity += accel * dt;
                }
            });

        let events = collisions::detect_collisions(world);
        collisions::resolve_collisions(world, &events)
    }
}

impl Integrator for SemiImplicitEuler {
    fn step(&self, world: &mut World) -> Vec<Merger> {
        let dt = world.time_step();
        let fade = world.config().fade_speed;

        let mergers = match self.pairing {
            PairingMode::Sequential => self.sequential_pass(world, dt),
            PairingMode::Simultaneous => self.simultaneous_pass(world, dt),
        };
        world.compact();

        (0..world.slot_count()).for_each(|idx| {
            if let Some(body) = world.slot_mut(idx) {
                body.integrate(dt);
                body.update_trail(fade);
            }
        });

        world.advance_clock(dt);
        mergers
    }
}
