//! Frame-driven simulation session
//!
//! The UI calls [`Simulation::submit`] whenever the user does something and
//! [`Simulation::frame`] once per animation callback. Submitted commands wait
//! in a queue and are applied together at the start of the next frame, before
//! that frame's tick, so the body collection never changes mid-tick.

use std::collections::VecDeque;

use nalgebra::Point2;

use crate::collisions::Merger;
use crate::command::{Command, SpawnForm, SpawnRequest};
use crate::config::WorldConfig;
use crate::diagnostics::Diagnostic;
use crate::error::WorldError;
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::presets;
use crate::snapshot::FrameSnapshot;
use crate::world::World;

/// What one call to [`Simulation::frame`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Commands applied from the queue, rejected ones included
    pub commands: usize,
    /// Whether physics advanced (false while paused)
    pub ticked: bool,
    pub mergers: Vec<Merger>,
}

/// # Examples
///
/// ```
/// use planets::command::{Command, SpawnRequest};
/// use planets::simulation::Simulation;
///
/// let mut sim = Simulation::default();
/// sim.submit(Command::SpawnPreset("solar".into()));
/// sim.submit(Command::Spawn(SpawnRequest::new("Comet", 2.2e14, 1.0, [0.0, 21_000.0], 300.0)));
///
/// // Nothing happens until the next frame
/// assert_eq!(sim.world().body_count(), 0);
///
/// let outcome = sim.frame();
/// assert_eq!(outcome.commands, 2);
/// assert!(outcome.ticked);
/// assert_eq!(sim.world().body_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    integrator: SemiImplicitEuler,
    pending: VecDeque<Command>,
    paused: bool,
}

impl Simulation {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            integrator: SemiImplicitEuler::new(config.pairing),
            world: World::new(config),
            pending: VecDeque::new(),
            paused: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queues a command for the start of the next frame
    pub fn submit(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Queues deletion around a point clicked in the current render frame
    ///
    /// The point is pinned to absolute coordinates now, against the anchor
    /// the user was looking at, so later anchor changes cannot move it.
    pub fn submit_delete_near(&mut self, point: Point2<f64>) {
        let at = self.world.render_to_world(point);
        self.submit(Command::DeleteNear(at));
    }

    /// Parses raw form input and queues the spawn
    ///
    /// Unparseable or invalid input is reported and nothing is queued.
    pub fn submit_form(&mut self, form: &SpawnForm) -> Result<(), WorldError> {
        match SpawnRequest::try_from(form) {
            Ok(request) => {
                self.submit(Command::Spawn(request));
                Ok(())
            }
            Err(err) => {
                self.reject(&err);
                Err(err.into())
            }
        }
    }

    /// Applies queued commands, then advances one tick unless paused
    pub fn frame(&mut self) -> FrameOutcome {
        let commands = self.drain_commands();

        if self.paused {
            return FrameOutcome {
                commands,
                ..FrameOutcome::default()
            };
        }

        let mergers = self.integrator.step(&mut self.world);
        FrameOutcome {
            commands,
            ticked: true,
            mergers,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.world, self.paused)
    }

    /// Takes every diagnostic logged since the last drain
    pub fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.world.diagnostics_mut().drain()
    }

    fn drain_commands(&mut self) -> usize {
        let mut count = 0;
        while let Some(command) = self.pending.pop_front() {
            if let Err(err) = self.apply(command) {
                self.reject(&err);
            }
            count += 1;
        }
        count
    }

    fn apply(&mut self, command: Command) -> Result<(), WorldError> {
        match command {
            Command::Spawn(request) => {
                self.world.spawn(&request)?;
            }
            Command::SpawnPreset(name) => {
                presets::spawn_preset(&mut self.world, &name)?;
            }
            Command::DeleteNear(point) => {
                let tolerance = self.world.config().delete_tolerance;
                self.world.delete_near(point, tolerance);
            }
            Command::SetTimeStep(seconds) => self.world.set_time_step(seconds)?,
            Command::TogglePause => {
                self.paused = !self.paused;
                let event = if self.paused {
                    Diagnostic::Paused
                } else {
                    Diagnostic::Resumed
                };
                self.world.diagnostics_mut().push(event);
            }
            Command::Reset => {
                self.world.reset();
            }
        }
        Ok(())
    }

    fn reject(&mut self, err: &dyn std::error::Error) {
        self.world.diagnostics_mut().push(Diagnostic::Rejected {
            reason: err.to_string(),
        });
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
