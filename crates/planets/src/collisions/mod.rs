//! Collision detection and resolution
//!
//! Bodies touch when their separation is within the sum of their radii
//! (scaled to meters). Touching bodies merge inelastically, conserving mass
//! and momentum.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionEvent, check_pair, detect_collisions, touching};
pub use resolution::{Merger, merge_bodies, merge_slots, resolve_collisions};
