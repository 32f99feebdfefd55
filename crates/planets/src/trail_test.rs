use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::trail::{Trail, TrailPoint};

#[test]
fn test_new_point_is_faded_immediately() {
    let mut trail = Trail::new();
    trail.record(Point2::new(0.0, 0.0), 0.25);

    let lives: Vec<f64> = trail.iter().map(|p| p.life).collect();
    assert_eq!(lives, vec![0.75]);
}

#[test]
fn test_points_are_oldest_first() {
    let mut trail = Trail::new();
    for x in 0..3 {
        trail.record(Point2::new(x as f64, 0.0), 0.25);
    }

    let xs: Vec<f64> = trail.iter().map(|p| p.position.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);

    let lives: Vec<f64> = trail.iter().map(|p| p.life).collect();
    assert_eq!(lives, vec![0.25, 0.5, 0.75]);
}

#[test]
fn test_fade_evicts_oldest_first() {
    let mut trail = Trail::new();
    for x in 0..4 {
        trail.record(Point2::new(x as f64, 0.0), 0.25);
    }
    // lives: [0.25, 0.5, 0.75] (the first point expired on the fourth record)
    assert_eq!(trail.len(), 3);

    trail.fade(0.25);
    assert_eq!(trail.len(), 2);
    assert_eq!(trail.iter().next().unwrap().position.x, 2.0);

    trail.fade(0.25);
    trail.fade(0.25);
    assert!(trail.is_empty());
}

#[test]
fn test_zero_fade_keeps_points_until_fully_faded() {
    let mut trail = Trail::new();
    trail.record(Point2::new(0.0, 0.0), 0.0);
    trail.record(Point2::new(1.0, 0.0), 0.0);

    // No fade means nothing expires
    assert_eq!(trail.len(), 2);

    trail.fade(1.0);
    assert!(trail.is_empty());
}

#[test]
fn test_trail_length_is_bounded() {
    let fade = 0.005;
    let mut trail = Trail::new();

    for i in 0..2_000 {
        trail.record(Point2::new(i as f64, 0.0), fade);
        assert!(trail.len() <= Trail::max_len(fade));
    }
    // Steady state: a point survives roughly 1 / fade ticks
    assert!(trail.len() >= 199);
}

#[test]
fn test_intensity_is_clamped() {
    let point = TrailPoint {
        position: Point2::origin(),
        life: 1.5,
    };
    assert_relative_eq!(point.intensity(), 1.0);

    let stale = TrailPoint {
        position: Point2::origin(),
        life: -0.2,
    };
    assert_relative_eq!(stale.intensity(), 0.0);
}

#[test]
fn test_clear() {
    let mut trail = Trail::new();
    trail.record(Point2::new(0.0, 0.0), 0.1);
    trail.clear();
    assert!(trail.is_empty());
}
