use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::body::{Body, BodyId, Rgb};
use crate::command::SpawnRequest;
use crate::config::WorldConfig;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::{InputError, WorldError};
use crate::forces::Gravity;
use crate::geometry;

/// Colours handed out to bodies spawned without one
const PALETTE: [Rgb; 8] = [
    Rgb::new(0xe6, 0x39, 0x46),
    Rgb::new(0xf4, 0xa2, 0x61),
    Rgb::new(0xe9, 0xc4, 0x6a),
    Rgb::new(0x2a, 0x9d, 0x8f),
    Rgb::new(0x45, 0x7b, 0x9d),
    Rgb::new(0xa8, 0xda, 0xdc),
    Rgb::new(0x9b, 0x5d, 0xe5),
    Rgb::new(0xf1, 0x5b, 0xb5),
];

/// The live collection of bodies and the parameters shared by all of them
///
/// Bodies are stored in slots. Between ticks every slot is occupied and slot
/// order is insertion order. During a tick a merged-away body leaves its slot
/// empty so indices of the remaining bodies stay put; [`World::compact`]
/// closes the gaps once the tick is over.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    gravity: Gravity,
    slots: Vec<Option<Body>>,
    next_id: u32,
    time_step: f64,
    /// Simulated seconds since creation or the last reset
    elapsed: f64,
    rng: ChaChaRng,
    diagnostics: DiagnosticLog,
}

impl World {
    /// Creates an empty world
    ///
    /// # Examples
    ///
    /// ```
    /// use planets::config::WorldConfig;
    /// use planets::world::World;
    ///
    /// let world = World::new(WorldConfig::default());
    /// assert_eq!(world.body_count(), 0);
    /// assert_eq!(world.time_step(), 86_400.0);
    /// ```
    pub fn new(config: WorldConfig) -> Self {
        Self {
            gravity: config.gravity(),
            time_step: config.time_step,
            rng: ChaChaRng::seed_from_u64(config.color_seed),
            config,
            slots: Vec::new(),
            next_id: 0,
            elapsed: 0.0,
            diagnostics: DiagnosticLog::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Changes the seconds per tick from the next tick on
    pub fn set_time_step(&mut self, seconds: f64) -> Result<(), InputError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(InputError::InvalidTimeStep(seconds));
        }
        self.time_step = seconds;
        self.diagnostics.push(Diagnostic::TimeStepChanged { seconds });
        Ok(())
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub(crate) fn advance_clock(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticLog {
        &mut self.diagnostics
    }

    // ---------------------------------------------------------------------
    // Storage
    // ---------------------------------------------------------------------

    /// Live bodies in collection order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.slots.iter().flatten()
    }

    pub fn body_count(&self) -> usize {
        self.bodies().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies().next().is_none()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.iter_mut().flatten().find(|b| b.id == id)
    }

    /// Adds a body without validation and returns its id
    ///
    /// Use [`World::spawn`] for untrusted input.
    pub fn add_body(
        &mut self,
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Rgb,
    ) -> BodyId {
        let id = self.allocate_id();
        self.slots
            .push(Some(Body::new(id, name, mass, radius, position, velocity, color)));
        id
    }

    /// Removes a body, keeping the order of the others
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.slot_of(id)?;
        self.slots.remove(idx)
    }

    pub(crate) fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slot(&self, idx: usize) -> Option<&Body> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub(crate) fn slot_mut(&mut self, idx: usize) -> Option<&mut Body> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    pub(crate) fn slot_of(&self, id: BodyId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|b| b.id == id))
    }

    /// Empties a slot without shifting the others
    pub(crate) fn take_slot(&mut self, idx: usize) -> Option<Body> {
        self.slots.get_mut(idx).and_then(Option::take)
    }

    pub(crate) fn put_slot(&mut self, idx: usize, body: Body) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = Some(body);
        }
    }

    /// Mutable access to slot `i` alongside shared access to slot `j`
    ///
    /// `None` if `i == j` or either slot is empty.
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Body, &Body)> {
        if i == j || i >= self.slots.len() || j >= self.slots.len() {
            return None;
        }
        let (a, b) = if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (&mut lo[i], &hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (&mut hi[0], &lo[j])
        };
        Some((a.as_mut()?, b.as_ref()?))
    }

    /// Drops empty slots left behind by merges
    pub(crate) fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    // ---------------------------------------------------------------------
    // Spawn and lookup
    // ---------------------------------------------------------------------

    /// The body with the greatest mass, first in collection order on ties
    ///
    /// This is the reference frame for rendering and spawn placement.
    pub fn most_massive(&self) -> Option<&Body> {
        self.bodies().fold(None, |best: Option<&Body>, b| match best {
            Some(top) if top.mass >= b.mass => Some(top),
            _ => Some(b),
        })
    }

    /// Like [`World::get`], as an error for unknown ids
    pub fn require(&self, id: BodyId) -> Result<&Body, WorldError> {
        self.get(id).ok_or(WorldError::UnknownBody(id))
    }

    /// Like [`World::most_massive`], as an error when the world is empty
    pub fn anchor(&self) -> Result<&Body, WorldError> {
        self.most_massive().ok_or(WorldError::NoAnchor)
    }

    /// Position of the anchor, or the origin when there is none
    pub fn anchor_position(&self) -> Point2<f64> {
        self.most_massive()
            .map(|b| b.position)
            .unwrap_or_else(Point2::origin)
    }

    /// Validates and adds a body `distance` render units along +x from the anchor
    ///
    /// # Arguments
    /// * `request` - Name, mass, radius, absolute velocity and anchor offset
    ///
    /// # Returns
    /// The new body's ID, or the validation error with the world unchanged.
    /// With no anchor the offset is measured from the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use planets::command::SpawnRequest;
    /// use planets::config::WorldConfig;
    /// use planets::world::World;
    ///
    /// let mut world = World::new(WorldConfig::default());
    /// let sun = world.spawn(&SpawnRequest::new("Sun", 1.989e30, 20.0, [0.0, 0.0], 0.0)).unwrap();
    /// let earth = world.spawn(&SpawnRequest::new("Earth", 5.972e24, 5.0, [0.0, 29_780.0], 150.0)).unwrap();
    ///
    /// // 150 render units at the default scale of 1e9 m
    /// let offset = world.get(earth).unwrap().position - world.get(sun).unwrap().position;
    /// assert!((offset.x - 1.5e11).abs() < 1.0);
    /// ```
    pub fn spawn(&mut self, request: &SpawnRequest) -> Result<BodyId, InputError> {
        request.validate()?;

        let position = geometry::from_render(
            &Point2::new(request.distance, 0.0),
            &self.anchor_position(),
            self.config.distance_scale,
        );
        let color = match request.color {
            Some(c) => c,
            None => self.next_color(),
        };

        let id = self.add_body(
            request.name.clone(),
            request.mass,
            request.radius,
            position,
            request.velocity(),
            color,
        );
        self.diagnostics.push(Diagnostic::Spawned {
            id,
            name: request.name.clone(),
            mass: request.mass,
        });
        Ok(id)
    }

    /// Removes every body within `radius + tolerance` of `point`
    ///
    /// Distances are compared in render units, but `point` itself is an
    /// absolute position, so the result does not depend on which body is the
    /// anchor. Deleting the anchor therefore never shifts the target for a
    /// later call at the same point.
    ///
    /// # Arguments
    /// * `point` - Absolute position in meters
    /// * `tolerance` - Slack added to each body's radius, in render units
    ///
    /// # Returns
    /// IDs of the removed bodies in collection order; empty if none was in
    /// range.
    pub fn delete_near(&mut self, point: Point2<f64>, tolerance: f64) -> Vec<BodyId> {
        let scale = self.config.distance_scale;

        let doomed: Vec<BodyId> = self
            .bodies()
            .filter(|b| geometry::distance(&b.position, &point) / scale <= b.radius + tolerance)
            .map(|b| b.id)
            .collect();

        for &id in &doomed {
            if let Some(body) = self.remove(id) {
                self.diagnostics.push(Diagnostic::Deleted {
                    id,
                    name: body.name,
                });
            }
        }
        doomed
    }

    /// Converts a point in the current render frame to absolute meters
    pub fn render_to_world(&self, point: Point2<f64>) -> Point2<f64> {
        geometry::from_render(&point, &self.anchor_position(), self.config.distance_scale)
    }

    /// Removes every body and rewinds the clock; returns how many were removed
    pub fn reset(&mut self) -> usize {
        let removed = self.body_count();
        self.slots.clear();
        self.elapsed = 0.0;
        self.diagnostics.push(Diagnostic::Reset { removed });
        removed
    }

    pub(crate) fn next_color(&mut self) -> Rgb {
        PALETTE[self.rng.gen_range(0..PALETTE.len())]
    }

    // ---------------------------------------------------------------------
    // Aggregates
    // ---------------------------------------------------------------------

    pub fn total_mass(&self) -> f64 {
        self.bodies().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies()
            .map(Body::momentum)
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass);
        Some(Point2::from(weighted / total))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies().map(Body::kinetic_energy).sum()
    }

    /// Sum of pairwise potential energies, each pair once
    pub fn potential_energy(&self) -> f64 {
        let bodies: Vec<&Body> = self.bodies().collect();
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..]
                    .iter()
                    .map(move |b| self.gravity.potential_energy(a, b))
            })
            .sum()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
