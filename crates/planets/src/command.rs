//! Inbound commands from the UI
//!
//! Commands are queued by [`Simulation::submit`](crate::simulation::Simulation::submit)
//! and applied together at the start of the next frame, never in the middle of
//! a tick.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::body::Rgb;
use crate::error::InputError;

/// A request to add one body, placed relative to the current anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRequest {
    pub name: String,
    /// kg
    pub mass: f64,
    /// render units
    pub radius: f64,
    /// m/s, absolute
    pub velocity: [f64; 2],
    /// Offset along +x from the anchor, in render units
    pub distance: f64,
    #[serde(default)]
    pub color: Option<Rgb>,
}

impl SpawnRequest {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        velocity: [f64; 2],
        distance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            velocity,
            distance,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn velocity(&self) -> Vector2<f64> {
        Vector2::new(self.velocity[0], self.velocity[1])
    }

    /// Rejects non-finite numbers and non-positive mass or radius
    ///
    /// # Examples
    ///
    /// ```
    /// use planets::command::SpawnRequest;
    /// use planets::error::InputError;
    ///
    /// let ok = SpawnRequest::new("moon", 7.3e22, 2.0, [0.0, 1_000.0], 150.0);
    /// assert!(ok.validate().is_ok());
    ///
    /// let massless = SpawnRequest::new("ghost", 0.0, 2.0, [0.0, 0.0], 10.0);
    /// assert_eq!(massless.validate(), Err(InputError::NonPositiveMass(0.0)));
    /// ```
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("mass", self.mass),
            ("radius", self.radius),
            ("velocityX", self.velocity[0]),
            ("velocityY", self.velocity[1]),
            ("distance", self.distance),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite { field });
        }
        if self.mass <= 0.0 {
            return Err(InputError::NonPositiveMass(self.mass));
        }
        if self.radius <= 0.0 {
            return Err(InputError::NonPositiveRadius(self.radius));
        }
        Ok(())
    }
}

/// Raw text fields as typed into the UI spawn form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnForm {
    pub name: String,
    pub mass: String,
    pub radius: String,
    pub velocity_x: String,
    pub velocity_y: String,
    pub distance: String,
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, InputError> {
    value.trim().parse::<f64>().map_err(|_| InputError::NotANumber {
        field,
        value: value.to_string(),
    })
}

impl TryFrom<&SpawnForm> for SpawnRequest {
    type Error = InputError;

    fn try_from(form: &SpawnForm) -> Result<Self, Self::Error> {
        let request = SpawnRequest::new(
            form.name.trim(),
            parse_field("mass", &form.mass)?,
            parse_field("radius", &form.radius)?,
            [
                parse_field("velocityX", &form.velocity_x)?,
                parse_field("velocityY", &form.velocity_y)?,
            ],
            parse_field("distance", &form.distance)?,
        );
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Spawn(SpawnRequest),
    SpawnPreset(String),
    /// Absolute position in meters; see
    /// [`Simulation::submit_delete_near`](crate::simulation::Simulation::submit_delete_near)
    /// for clicks in render coordinates
    DeleteNear(Point2<f64>),
    SetTimeStep(f64),
    TogglePause,
    Reset,
}
