use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{BodyId, Rgb};
use crate::command::SpawnRequest;
use crate::config::WorldConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{InputError, WorldError};
use crate::world::World;

const WHITE: Rgb = Rgb::new(255, 255, 255);

fn add(world: &mut World, name: &str, mass: f64, radius: f64, x: f64, y: f64) -> BodyId {
    world.add_body(name, mass, radius, Point2::new(x, y), Vector2::zeros(), WHITE)
}

#[test]
fn test_new_world_is_empty() {
    let world = World::new(WorldConfig::default());

    assert!(world.is_empty());
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.elapsed(), 0.0);
    assert!(world.diagnostics().is_empty());
}

#[test]
fn test_add_body_assigns_increasing_ids() {
    let mut world = World::default();

    let a = add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);
    let b = add(&mut world, "b", 1.0, 1.0, 0.0, 0.0);

    assert_eq!(a, BodyId(0));
    assert_eq!(b, BodyId(1));
}

#[test]
fn test_ids_are_not_reused_after_removal() {
    let mut world = World::default();
    let a = add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);

    assert!(world.remove(a).is_some());
    let b = add(&mut world, "b", 1.0, 1.0, 0.0, 0.0);

    assert_ne!(a, b);
    assert!(world.remove(a).is_none());
}

#[test]
fn test_remove_keeps_order() {
    let mut world = World::default();
    add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);
    let b = add(&mut world, "b", 1.0, 1.0, 0.0, 0.0);
    add(&mut world, "c", 1.0, 1.0, 0.0, 0.0);

    world.remove(b);

    let names: Vec<&str> = world.bodies().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_get_mut() {
    let mut world = World::default();
    let a = add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);

    world.get_mut(a).unwrap().velocity = Vector2::new(1.0, 2.0);

    assert_eq!(world.get(a).unwrap().velocity, Vector2::new(1.0, 2.0));
    assert!(world.get(BodyId(42)).is_none());
}

#[test]
fn test_most_massive_prefers_first_on_ties() {
    let mut world = World::default();
    add(&mut world, "small", 1.0, 1.0, 0.0, 0.0);
    let first = add(&mut world, "big", 5.0, 1.0, 0.0, 0.0);
    add(&mut world, "also big", 5.0, 1.0, 0.0, 0.0);

    assert_eq!(world.most_massive().unwrap().id, first);
}

#[test]
fn test_no_anchor_on_empty_world() {
    let world = World::default();

    assert!(world.most_massive().is_none());
    assert_eq!(world.anchor().unwrap_err(), WorldError::NoAnchor);
    assert_eq!(world.anchor_position(), Point2::origin());
}

#[test]
fn test_spawn_without_anchor_uses_origin() {
    let mut world = World::default();

    let id = world
        .spawn(&SpawnRequest::new("first", 1.0e24, 3.0, [5.0, 6.0], 100.0))
        .unwrap();

    let body = world.get(id).unwrap();
    assert_relative_eq!(body.position.x, 100.0 * 1.0e9);
    assert_eq!(body.position.y, 0.0);
    assert_eq!(body.velocity, Vector2::new(5.0, 6.0));
}

#[test]
fn test_spawn_relative_to_anchor() {
    let mut world = World::default();
    add(&mut world, "moon", 1.0e22, 1.0, 0.0, 0.0);
    add(&mut world, "star", 2.0e30, 10.0, 3.0e11, -2.0e11);

    let id = world
        .spawn(&SpawnRequest::new("planet", 6.0e24, 5.0, [0.0, 30_000.0], 50.0))
        .unwrap();

    let body = world.get(id).unwrap();
    assert_relative_eq!(body.position.x, 3.0e11 + 5.0e10);
    assert_relative_eq!(body.position.y, -2.0e11);
}

#[test]
fn test_spawn_logs_diagnostic() {
    let mut world = World::default();

    let id = world
        .spawn(&SpawnRequest::new("Ceres", 9.38e20, 1.0, [0.0, 0.0], 0.0))
        .unwrap();

    let entries: Vec<&Diagnostic> = world.diagnostics().iter().collect();
    assert_eq!(
        entries,
        vec![&Diagnostic::Spawned {
            id,
            name: "Ceres".into(),
            mass: 9.38e20,
        }]
    );
    assert_eq!(entries[0].to_string(), "Spawned Ceres with mass 9.380e20 kg");
}

#[test]
fn test_spawn_rejects_degenerate_input() {
    let mut world = World::default();
    let cases = [
        (SpawnRequest::new("x", 0.0, 1.0, [0.0, 0.0], 0.0), InputError::NonPositiveMass(0.0)),
        (SpawnRequest::new("x", -5.0, 1.0, [0.0, 0.0], 0.0), InputError::NonPositiveMass(-5.0)),
        (SpawnRequest::new("x", 1.0, 0.0, [0.0, 0.0], 0.0), InputError::NonPositiveRadius(0.0)),
        (
            SpawnRequest::new("x", f64::NAN, 1.0, [0.0, 0.0], 0.0),
            InputError::NonFinite { field: "mass" },
        ),
        (
            SpawnRequest::new("x", 1.0, 1.0, [f64::INFINITY, 0.0], 0.0),
            InputError::NonFinite { field: "velocityX" },
        ),
    ];

    for (request, expected) in cases {
        assert_eq!(world.spawn(&request), Err(expected));
    }
    assert!(world.is_empty());
    assert!(world.diagnostics().is_empty());
}

#[test]
fn test_spawn_uses_requested_color_or_palette() {
    let red = Rgb::new(255, 0, 0);
    let mut world = World::default();

    let chosen = world
        .spawn(&SpawnRequest::new("a", 1.0, 1.0, [0.0, 0.0], 0.0).with_color(red))
        .unwrap();
    assert_eq!(world.get(chosen).unwrap().color, red);

    // Palette draws are reproducible for a given seed
    let mut other = World::default();
    let drawn_a = world
        .spawn(&SpawnRequest::new("b", 1.0, 1.0, [0.0, 0.0], 100.0))
        .unwrap();
    let drawn_b = other
        .spawn(&SpawnRequest::new("b", 1.0, 1.0, [0.0, 0.0], 100.0))
        .unwrap();
    assert_eq!(world.get(drawn_a).unwrap().color, other.get(drawn_b).unwrap().color);
}

#[test]
fn test_delete_near_removes_all_within_tolerance() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);
    let a = add(&mut world, "a", 1.0e24, 5.0, 100.0 * scale, 0.0);
    let b = add(&mut world, "b", 1.0e24, 5.0, 110.0 * scale, 0.0);
    add(&mut world, "c", 1.0e24, 5.0, 200.0 * scale, 0.0);

    // Both a and b are within radius + 10 render units of the point
    let removed = world.delete_near(Point2::new(105.0 * scale, 0.0), 10.0);

    assert_eq!(removed, vec![a, b]);
    let names: Vec<&str> = world.bodies().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["sun", "c"]);
}

#[test]
fn test_render_to_world_is_relative_to_anchor() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    add(&mut world, "sun", 2.0e30, 20.0, 1.0e12, 1.0e12);
    let planet = add(&mut world, "planet", 1.0e24, 5.0, 1.0e12 + 50.0 * scale, 1.0e12);

    let at = world.render_to_world(Point2::new(50.0, 0.0));
    assert_relative_eq!(at.x, 1.0e12 + 5.0e10);
    assert_relative_eq!(at.y, 1.0e12);

    assert_eq!(world.delete_near(at, 0.0), vec![planet]);
}

#[test]
fn test_render_to_world_without_anchor_uses_origin() {
    let world = World::default();

    assert_eq!(world.render_to_world(Point2::new(2.0, -3.0)), Point2::new(2.0e9, -3.0e9));
}

#[test]
fn test_delete_near_boundary_is_inclusive() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);

    // 20 radius + 10 tolerance
    assert!(world.delete_near(Point2::new(30.5 * scale, 0.0), 10.0).is_empty());
    assert_eq!(world.delete_near(Point2::new(30.0 * scale, 0.0), 10.0).len(), 1);
}

#[test]
fn test_delete_near_removing_anchor_keeps_others_in_range() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);
    add(&mut world, "planet", 1.0e24, 15.0, 25.0 * scale, 0.0);

    // Touches both the sun (at 0) and the planet (at 25)
    let removed = world.delete_near(Point2::new(12.0 * scale, 0.0), 0.0);

    assert_eq!(removed.len(), 2);
    assert!(world.is_empty());
}

#[test]
fn test_delete_near_is_idempotent() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);
    let planet = add(&mut world, "planet", 1.0e24, 5.0, 100.0 * scale, 0.0);
    let point = Point2::new(100.0 * scale, 0.0);

    assert!(world.delete_near(Point2::new(500.0 * scale, 500.0 * scale), 10.0).is_empty());
    assert_eq!(world.body_count(), 2);

    assert_eq!(world.delete_near(point, 10.0), vec![planet]);
    assert!(world.delete_near(point, 10.0).is_empty());
    assert_eq!(world.body_count(), 1);
}

#[test]
fn test_deleting_the_anchor_twice_leaves_the_rest() {
    let mut world = World::default();
    let scale = world.config().distance_scale;
    let sun = add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);
    let planet = add(&mut world, "planet", 1.0e24, 5.0, 100.0 * scale, 0.0);
    let point = world.render_to_world(Point2::new(0.0, 0.0));

    assert_eq!(world.delete_near(point, 10.0), vec![sun]);
    // The planet is now the anchor but still 90 units out of range
    assert!(world.delete_near(point, 10.0).is_empty());
    assert_eq!(world.require(planet).unwrap().name, "planet");
}

#[test]
fn test_delete_near_logs_each_removal() {
    let mut world = World::default();
    add(&mut world, "sun", 2.0e30, 20.0, 0.0, 0.0);

    world.delete_near(Point2::new(0.0, 0.0), 10.0);

    let last = world.diagnostics().iter().last().unwrap();
    assert_eq!(last.to_string(), "Deleted sun");
}

#[test]
fn test_reset_clears_bodies_and_clock() {
    let mut world = World::default();
    add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);
    add(&mut world, "b", 1.0, 1.0, 0.0, 0.0);
    world.advance_clock(100.0);
    world.set_time_step(60.0).unwrap();

    assert_eq!(world.reset(), 2);

    assert!(world.is_empty());
    assert_eq!(world.elapsed(), 0.0);
    assert_eq!(world.time_step(), 60.0);
    assert_eq!(
        world.diagnostics().iter().last(),
        Some(&Diagnostic::Reset { removed: 2 })
    );
}

#[test]
fn test_set_time_step_validation() {
    let mut world = World::default();

    assert_eq!(world.set_time_step(0.0), Err(InputError::InvalidTimeStep(0.0)));
    assert_eq!(world.set_time_step(-1.0), Err(InputError::InvalidTimeStep(-1.0)));
    assert!(world.set_time_step(f64::NAN).is_err());
    assert_eq!(world.time_step(), 86_400.0);

    world.set_time_step(3_600.0).unwrap();
    assert_eq!(world.time_step(), 3_600.0);
}

#[test]
fn test_aggregates() {
    let mut world = World::default();
    world.add_body("a", 1.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(2.0, 0.0), WHITE);
    world.add_body("b", 3.0, 1.0, Point2::new(4.0, 8.0), Vector2::new(0.0, -1.0), WHITE);

    assert_relative_eq!(world.total_mass(), 4.0);
    assert_eq!(world.total_momentum(), Vector2::new(2.0, -3.0));
    assert_relative_eq!(world.kinetic_energy(), 0.5 * 4.0 + 0.5 * 3.0);

    let com = world.center_of_mass().unwrap();
    assert_relative_eq!(com.x, 3.0);
    assert_relative_eq!(com.y, 6.0);

    assert!(world.potential_energy() < 0.0);
    assert!(World::default().center_of_mass().is_none());
}

#[test]
fn test_pair_mut_rejects_self_and_empty_slots() {
    let mut world = World::default();
    add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);
    add(&mut world, "b", 2.0, 1.0, 0.0, 0.0);

    assert!(world.pair_mut(0, 0).is_none());
    assert!(world.pair_mut(0, 5).is_none());

    let (a, b) = world.pair_mut(1, 0).unwrap();
    assert_eq!((a.name.as_str(), b.name.as_str()), ("b", "a"));

    world.take_slot(1);
    assert!(world.pair_mut(0, 1).is_none());
    world.compact();
    assert_eq!(world.body_count(), 1);
}

#[test]
fn test_require_unknown_body() {
    let mut world = World::default();
    let a = add(&mut world, "a", 1.0, 1.0, 0.0, 0.0);

    assert_eq!(world.require(a).unwrap().name, "a");
    assert_eq!(world.require(BodyId(9)).unwrap_err(), WorldError::UnknownBody(BodyId(9)));
}

#[test]
fn test_config_validation() {
    let bad = WorldConfig {
        time_step: 0.0,
        ..WorldConfig::default()
    };

    assert!(WorldConfig::default().validate().is_ok());
    assert_eq!(bad.validate(), Err(InputError::InvalidTimeStep(0.0)));
}

#[test]
fn test_config_validation_names_the_field() {
    let cases = [
        (
            WorldConfig { gravitational_constant: -1.0, ..WorldConfig::default() },
            "gravitational_constant",
        ),
        (WorldConfig { distance_scale: 0.0, ..WorldConfig::default() }, "distance_scale"),
        (WorldConfig { distance_scale: f64::INFINITY, ..WorldConfig::default() }, "distance_scale"),
        (WorldConfig { min_separation: f64::NAN, ..WorldConfig::default() }, "min_separation"),
        (WorldConfig { fade_speed: 0.0, ..WorldConfig::default() }, "fade_speed"),
        (WorldConfig { fade_speed: 1.5, ..WorldConfig::default() }, "fade_speed"),
        (WorldConfig { delete_tolerance: -0.1, ..WorldConfig::default() }, "delete_tolerance"),
    ];

    for (config, expected) in cases {
        match config.validate() {
            Err(InputError::OutOfRange { field, .. }) => assert_eq!(field, expected),
            other => panic!("{expected}: expected OutOfRange, got {other:?}"),
        }
    }
}

#[test]
fn test_config_validation_accepts_edges() {
    let config = WorldConfig {
        fade_speed: 1.0,
        delete_tolerance: 0.0,
        ..WorldConfig::default()
    };

    assert!(config.validate().is_ok());
    assert_eq!(
        WorldConfig { distance_scale: -2.0, ..WorldConfig::default() }
            .validate()
            .unwrap_err()
            .to_string(),
        "distance_scale is out of range: -2"
    );
}
