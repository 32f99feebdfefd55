//! Decaying position history used to draw a body's path

use std::collections::VecDeque;

use nalgebra::Point2;

/// One recorded position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Point2<f64>,
    /// Remaining life in (0, 1]; the point is evicted once it reaches zero
    pub life: f64,
}

impl TrailPoint {
    /// Draw intensity, clamped to [0, 1]
    pub fn intensity(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }
}

/// FIFO history of positions, oldest at the front
///
/// Points are appended at full life and lose `fade` every tick. Eviction only
/// ever looks at the front, so a stale point behind a live one stays until it
/// reaches the front.
///
/// # Examples
///
/// ```
/// use planets::trail::Trail;
/// use nalgebra::Point2;
///
/// let mut trail = Trail::new();
/// trail.record(Point2::new(1.0, 2.0), 0.5);
/// trail.record(Point2::new(1.5, 2.0), 0.5);
///
/// // The first point has faded twice and is gone
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `position` at full life, fades every point, then evicts
    /// expired points from the front
    pub fn record(&mut self, position: Point2<f64>, fade: f64) {
        self.points.push_back(TrailPoint {
            position,
            life: 1.0,
        });
        self.fade(fade);
    }

    /// Decrements the life of every point and evicts expired points from the front
    pub fn fade(&mut self, amount: f64) {
        self.points.iter_mut().for_each(|p| p.life -= amount);
        self.evict();
    }

    fn evict(&mut self) {
        while self.points.front().is_some_and(|p| p.life <= 0.0) {
            self.points.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Upper bound on the length a trail reaches when one point is recorded
    /// per tick with the given fade (one extra slot absorbs rounding in the
    /// repeated subtraction)
    pub fn max_len(fade: f64) -> usize {
        if fade <= 0.0 {
            return usize::MAX;
        }
        (1.0 / fade).ceil() as usize + 1
    }
}
