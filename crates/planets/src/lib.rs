//! Gravitational sandbox core
//!
//! Bodies pull on each other with pairwise Newtonian gravity, merge
//! inelastically when they touch, and leave fading trails. The UI drives a
//! [`Simulation`](simulation::Simulation) one frame at a time and reads back a
//! [`FrameSnapshot`](snapshot::FrameSnapshot).

pub mod body;
pub mod collisions;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod integrator;
pub mod presets;
pub mod simulation;
pub mod snapshot;
pub mod trail;
pub mod world;

#[cfg(test)]
mod trail_test;
#[cfg(test)]
mod world_test;
