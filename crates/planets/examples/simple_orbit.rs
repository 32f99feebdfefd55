//! Orbital integration example
//!
//! Loads the solar preset and tracks Earth's distance from the Sun along with
//! the total energy of the system over one year.
//!
//! Run with: cargo run --package planets --example simple_orbit

use planets::integrator::{Integrator, SemiImplicitEuler};
use planets::presets::spawn_preset;
use planets::world::World;

fn total_energy(world: &World) -> f64 {
    world.kinetic_energy() + world.potential_energy()
}

fn main() {
    println!("Orbit Test: inner solar system\n");
    println!("{}", "=".repeat(60));

    let mut world = World::default();
    if let Err(err) = spawn_preset(&mut world, "solar") {
        eprintln!("{err}");
        return;
    }

    for body in world.bodies() {
        println!(
            "  {:<8} m = {:.3e} kg  r = {:.3e} m  v = {:.0} m/s",
            body.name,
            body.mass,
            body.position.coords.magnitude(),
            body.speed()
        );
    }

    let initial_energy = total_energy(&world);
    println!("\nInitial total energy: {initial_energy:.6e} J");

    let integrator = SemiImplicitEuler::default();
    println!("\n{:>6} {:>14} {:>14}", "day", "Earth r (m)", "dE/E");
    for month in 1..=12 {
        integrator.integrate(&mut world, 30);

        let sun = world.bodies().find(|b| b.name == "Sun");
        let earth = world.bodies().find(|b| b.name == "Earth");
        if let (Some(sun), Some(earth)) = (sun, earth) {
            let drift = (total_energy(&world) - initial_energy) / initial_energy.abs();
            println!(
                "{:>6} {:>14.4e} {:>14.3e}",
                month * 30,
                earth.distance_to(sun),
                drift
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Elapsed: {:.1} days", world.elapsed() / 86_400.0);
}
