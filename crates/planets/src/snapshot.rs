//! Render observations
//!
//! Everything here is in render units relative to the anchor (the most
//! massive body), so the anchor always draws at the origin.

use nalgebra::Point2;
use serde::Serialize;

use crate::body::{Body, BodyId};
use crate::error::WorldError;
use crate::geometry;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrailView {
    pub x: f64,
    pub y: f64,
    /// Normalized fade in [0, 1]
    pub intensity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyView {
    pub id: BodyId,
    pub name: String,
    /// kg
    pub mass: f64,
    pub position: [f64; 2],
    pub radius: f64,
    pub color: String,
    pub trail: Vec<TrailView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    /// Simulated seconds since the last reset
    pub elapsed: f64,
    pub paused: bool,
    pub time_step: f64,
    pub anchor: Option<BodyId>,
    pub bodies: Vec<BodyView>,
}

fn body_view(body: &Body, origin: &Point2<f64>, scale: f64) -> BodyView {
    let position = geometry::to_render(&body.position, origin, scale);
    BodyView {
        id: body.id,
        name: body.name.clone(),
        mass: body.mass,
        position: [position.x, position.y],
        radius: body.radius,
        color: body.color.to_hex(),
        trail: body
            .trail
            .iter()
            .map(|p| {
                let at = geometry::to_render(&p.position, origin, scale);
                TrailView {
                    x: at.x,
                    y: at.y,
                    intensity: p.intensity(),
                }
            })
            .collect(),
    }
}

impl BodyView {
    /// Captures a single body in the current anchor frame
    pub fn capture(world: &World, id: BodyId) -> Result<Self, WorldError> {
        let body = world.require(id)?;
        Ok(body_view(body, &world.anchor_position(), world.config().distance_scale))
    }
}

impl FrameSnapshot {
    /// Captures the world as the renderer should draw it
    ///
    /// With no bodies there is no anchor and the frame is empty.
    pub fn capture(world: &World, paused: bool) -> Self {
        let anchor = world.most_massive();
        let origin = anchor.map(|b| b.position).unwrap_or_else(Point2::origin);
        let scale = world.config().distance_scale;

        Self {
            elapsed: world.elapsed(),
            paused,
            time_step: world.time_step(),
            anchor: anchor.map(|b| b.id),
            bodies: world
                .bodies()
                .map(|b| body_view(b, &origin, scale))
                .collect(),
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyView> {
        self.bodies.iter().find(|b| b.id == id)
    }
}

