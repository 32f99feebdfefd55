//! Fixed reference configurations
//!
//! Presets place bodies at absolute positions and are additive: loading one
//! does not clear the world.

use nalgebra::{Point2, Vector2};

use crate::body::{BodyId, Rgb};
use crate::diagnostics::Diagnostic;
use crate::error::InputError;
use crate::world::World;

/// Names accepted by [`spawn_preset`]
pub const PRESET_NAMES: [&str; 2] = ["solar", "binary"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetBody {
    pub name: &'static str,
    pub mass: f64,              // kg
    pub radius: f64,            // render units
    pub position: [f64; 2],     // m
    pub velocity: [f64; 2],     // m/s
    pub color: Rgb,
}

/// The Sun and the four inner planets on circular orbits along +x
pub const SOLAR: [PresetBody; 5] = [
    PresetBody {
        name: "Sun",
        mass: 1.989e30,
        radius: 20.0,
        position: [0.0, 0.0],
        velocity: [0.0, 0.0],
        color: Rgb::new(0xff, 0xcc, 0x33),
    },
    PresetBody {
        name: "Mercury",
        mass: 3.301e23,
        radius: 3.0,
        position: [5.791e10, 0.0],
        velocity: [0.0, 47_360.0],
        color: Rgb::new(0xb5, 0xb5, 0xb5),
    },
    PresetBody {
        name: "Venus",
        mass: 4.867e24,
        radius: 5.0,
        position: [1.082e11, 0.0],
        velocity: [0.0, 35_020.0],
        color: Rgb::new(0xe8, 0xc1, 0x70),
    },
    PresetBody {
        name: "Earth",
        mass: 5.972e24,
        radius: 5.0,
        position: [1.496e11, 0.0],
        velocity: [0.0, 29_780.0],
        color: Rgb::new(0x4f, 0x8f, 0xe0),
    },
    PresetBody {
        name: "Mars",
        mass: 6.417e23,
        radius: 4.0,
        position: [2.279e11, 0.0],
        velocity: [0.0, 24_070.0],
        color: Rgb::new(0xd1, 0x60, 0x3d),
    },
];

const BINARY_STAR_MASS: f64 = 1.0e30;
const BINARY_HALF_SEPARATION: f64 = 5.0e10;

/// Two equal stars on a shared circular orbit about the origin
///
/// Orbital speed depends on the world's gravitational constant, so this one
/// is built rather than declared.
pub fn binary(gravitational_constant: f64) -> [PresetBody; 2] {
    // v²/r = G m / (2r)²
    let speed = (gravitational_constant * BINARY_STAR_MASS / (4.0 * BINARY_HALF_SEPARATION)).sqrt();
    [
        PresetBody {
            name: "Alpha",
            mass: BINARY_STAR_MASS,
            radius: 12.0,
            position: [-BINARY_HALF_SEPARATION, 0.0],
            velocity: [0.0, -speed],
            color: Rgb::new(0xff, 0xe0, 0x8a),
        },
        PresetBody {
            name: "Beta",
            mass: BINARY_STAR_MASS,
            radius: 12.0,
            position: [BINARY_HALF_SEPARATION, 0.0],
            velocity: [0.0, speed],
            color: Rgb::new(0x8a, 0xb4, 0xff),
        },
    ]
}

/// Look up a preset's bodies by name
pub fn preset_bodies(
    name: &str,
    gravitational_constant: f64,
) -> Result<Vec<PresetBody>, InputError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "solar" => Ok(SOLAR.to_vec()),
        "binary" => Ok(binary(gravitational_constant).to_vec()),
        _ => Err(InputError::UnknownPreset(name.to_string())),
    }
}

/// Add a preset's bodies to `world`
///
/// # Examples
///
/// ```
/// use planets::presets::spawn_preset;
/// use planets::world::World;
///
/// let mut world = World::default();
/// let ids = spawn_preset(&mut world, "solar").unwrap();
///
/// assert_eq!(ids.len(), 5);
/// assert_eq!(world.most_massive().unwrap().name, "Sun");
/// ```
pub fn spawn_preset(world: &mut World, name: &str) -> Result<Vec<BodyId>, InputError> {
    let bodies = preset_bodies(name, world.config().gravitational_constant)?;

    let ids: Vec<BodyId> = bodies
        .iter()
        .map(|p| {
            world.add_body(
                p.name,
                p.mass,
                p.radius,
                Point2::new(p.position[0], p.position[1]),
                Vector2::new(p.velocity[0], p.velocity[1]),
                p.color,
            )
        })
        .collect();

    world.diagnostics_mut().push(Diagnostic::PresetSpawned {
        preset: name.to_string(),
        count: ids.len(),
    });
    Ok(ids)
}
