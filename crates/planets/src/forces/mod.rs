//! Gravitational force law
//!
//! Pairwise Newtonian gravity with a fixed minimum-separation clamp in place
//! of softening.

pub mod gravity;


pub use gravity::Gravity;

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.674e-11;

/// Separation below which the force stops growing (m)
pub const MIN_SEPARATION: f64 = 1.0e7;
