//! WASM bindings for the planets sandbox.
//!
//! This crate exposes the `planets` core to the browser front end. The page
//! owns the canvas and the input controls; everything physical happens here.
//!
//! # Architecture
//!
//! Simulations live in thread-local storage (WASM is single-threaded) and are
//! referenced from JavaScript by opaque IDs. User actions are queued with the
//! `simulation_*` command functions and applied at the start of the next
//! `simulation_frame`, which the page calls once per animation callback.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create();
//! simulation_spawn_preset(simId, "solar");
//!
//! // From the spawn form
//! simulation_spawn(simId, {
//!   name: "Comet",
//!   mass: "2.2e14",
//!   radius: "1",
//!   velocityX: "0",
//!   velocityY: "21000",
//!   distance: "300"
//! });
//!
//! function animate() {
//!   const frame = simulation_frame(simId);
//!   for (const line of simulation_drain_diagnostics(simId)) console.log(line);
//!   draw(frame.snapshot.bodies);
//!   requestAnimationFrame(animate);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use nalgebra::Point2;
use planets::body::BodyId;
use planets::command::{Command, SpawnForm};
use planets::config::WorldConfig;
use planets::simulation::Simulation;
use planets::snapshot::{BodyView, FrameSnapshot};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn not_found(sim_id: u32) -> JsError {
    JsError::new(&format!("Simulation {} not found", sim_id))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn register(simulation: Simulation) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });

    id
}

/// Queues `command` on a simulation
fn submit(sim_id: u32, command: Command) -> Result<(), JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        sim.submit(command);
        Ok(())
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Result of one animation frame
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSummary {
    /// Commands applied from the queue
    pub commands: usize,
    /// Whether physics advanced
    pub ticked: bool,
    /// IDs of bodies created by mergers this frame
    pub merged: Vec<u32>,
    pub snapshot: FrameSnapshot,
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a simulation with the default configuration.
///
/// Returns a simulation ID for use with other functions.
#[wasm_bindgen]
pub fn simulation_create() -> u32 {
    register(Simulation::new(WorldConfig::default()))
}

/// Create a simulation with a custom configuration.
///
/// # Arguments
/// * `config` - Partial `WorldConfig` object with snake_case keys; missing
///   fields take defaults
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue) -> Result<u32, JsError> {
    let config: WorldConfig = if config.is_undefined() || config.is_null() {
        WorldConfig::default()
    } else {
        from_js(config)?
    };

    config
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(register(Simulation::new(config)))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

// =============================================================================
// Commands
// =============================================================================

/// Queue a spawn from the raw text of the spawn form.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `form` - `{ name, mass, radius, velocityX, velocityY, distance }`, all strings
///
/// # Returns
/// false if the input was rejected; the reason is in the diagnostics
#[wasm_bindgen]
pub fn simulation_spawn(sim_id: u32, form: JsValue) -> Result<bool, JsError> {
    let form: SpawnForm = from_js(form)?;

    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        Ok(sim.submit_form(&form).is_ok())
    })
}

/// Queue loading a named preset ("solar" or "binary").
#[wasm_bindgen]
pub fn simulation_spawn_preset(sim_id: u32, name: String) -> Result<(), JsError> {
    submit(sim_id, Command::SpawnPreset(name))
}

/// Queue deleting every body near a canvas point.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `x` - X in render units relative to the anchor drawn last frame
/// * `y` - Y in render units relative to the anchor drawn last frame
#[wasm_bindgen]
pub fn simulation_delete_near(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        sim.submit_delete_near(Point2::new(x, y));
        Ok(())
    })
}

/// Queue a new time step in seconds.
#[wasm_bindgen]
pub fn simulation_set_time_step(sim_id: u32, seconds: f64) -> Result<(), JsError> {
    submit(sim_id, Command::SetTimeStep(seconds))
}

/// Queue a pause toggle.
#[wasm_bindgen]
pub fn simulation_toggle_pause(sim_id: u32) -> Result<(), JsError> {
    submit(sim_id, Command::TogglePause)
}

/// Queue removal of every body.
#[wasm_bindgen]
pub fn simulation_reset(sim_id: u32) -> Result<(), JsError> {
    submit(sim_id, Command::Reset)
}

// =============================================================================
// Stepping and state queries
// =============================================================================

/// Apply queued commands and advance one tick unless paused.
///
/// # Returns
/// A `FrameSummary` carrying the snapshot to draw
#[wasm_bindgen]
pub fn simulation_frame(sim_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let outcome = sim.frame();
        let summary = FrameSummary {
            commands: outcome.commands,
            ticked: outcome.ticked,
            merged: outcome.mergers.iter().map(|m| m.merged.0).collect(),
            snapshot: sim.snapshot(),
        };

        to_js(&summary)
    })
}

/// Get the current frame snapshot without advancing.
#[wasm_bindgen]
pub fn simulation_snapshot(sim_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        to_js(&sim.snapshot())
    })
}

/// Get one body in the current anchor frame.
#[wasm_bindgen]
pub fn simulation_body(sim_id: u32, body_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let view = BodyView::capture(sim.world(), BodyId(body_id))
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&view)
    })
}

/// Take the diagnostic lines logged since the last call.
///
/// Call this every frame: between drains the log keeps only the newest
/// `planets::diagnostics::MAX_ENTRIES` lines.
#[wasm_bindgen]
pub fn simulation_drain_diagnostics(sim_id: u32) -> Result<Vec<String>, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        Ok(sim
            .drain_diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect())
    })
}

/// Get body count.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        Ok(sim.world().body_count())
    })
}

/// Names of the presets accepted by `simulation_spawn_preset`.
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    planets::presets::PRESET_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}
