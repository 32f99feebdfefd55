//! Collision example
//!
//! Drops a ring of embryos on crossing orbits around a star and reports every
//! merger as it happens.
//!
//! Run with: cargo run --package planets --example collision_demo

use planets::command::{Command, SpawnRequest};
use planets::config::WorldConfig;
use planets::simulation::Simulation;

fn main() {
    println!("Collision Demo: embryos on crossing orbits\n");
    println!("{}", "=".repeat(60));

    let config = WorldConfig {
        time_step: 3_600.0,
        ..WorldConfig::default()
    };
    let g = config.gravitational_constant;
    let mut sim = Simulation::new(config);

    let star_mass = 1.989e30;
    sim.submit(Command::Spawn(SpawnRequest::new("Star", star_mass, 20.0, [0.0, 0.0], 0.0)));

    for i in 0..8 {
        let distance = 140.0 + i as f64 * 2.5; // render units
        let circular = (g * star_mass / (distance * 1.0e9)).sqrt();
        // Alternate too fast and too slow so neighbours cross
        let kick = if i % 2 == 0 { 1.04 } else { 0.96 };

        sim.submit(Command::Spawn(SpawnRequest::new(
            format!("E{}", i + 1),
            3.0e24,
            1.0,
            [0.0, circular * kick],
            distance,
        )));
    }

    sim.frame();
    for entry in sim.drain_diagnostics() {
        println!("  {entry}");
    }
    println!("\nInitial body count: {}", sim.world().body_count());

    let days = 3 * 365;
    let mut mergers = 0;
    for _ in 0..days * 24 {
        let outcome = sim.frame();
        mergers += outcome.mergers.len();
        for entry in sim.drain_diagnostics() {
            println!("t={:7.1} d: {entry}", sim.world().elapsed() / 86_400.0);
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Final body count: {}", sim.world().body_count());
    println!("Total mergers: {mergers}");

    let snapshot = sim.snapshot();
    for body in &snapshot.bodies {
        println!(
            "  {:<24} mass={:.3e} kg  at ({:8.2}, {:8.2})",
            body.name, body.mass, body.position[0], body.position[1]
        );
    }
}
