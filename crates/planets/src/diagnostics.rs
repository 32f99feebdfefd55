//! Diagnostic events
//!
//! The core never prints. Everything a user should be told about (merges,
//! spawns, deletions, pause state, rejected input) is appended to a
//! [`DiagnosticLog`] that the boundary drains once per frame. A log that is
//! never drained keeps only the newest [`MAX_ENTRIES`].

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::body::BodyId;

/// Entries held between drains before the oldest are dropped
pub const MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    Spawned {
        id: BodyId,
        name: String,
        mass: f64,
    },
    PresetSpawned {
        preset: String,
        count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Merged {
        survivor: String,
        absorbed: String,
        merged_id: BodyId,
        merged_name: String,
        mass: f64,
    },
    Deleted {
        id: BodyId,
        name: String,
    },
    Paused,
    Resumed,
    Reset {
        removed: usize,
    },
    TimeStepChanged {
        seconds: f64,
    },
    Rejected {
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Spawned { name, mass, .. } => {
                write!(f, "Spawned {name} with mass {mass:.3e} kg")
            }
            Diagnostic::PresetSpawned { preset, count } => {
                write!(f, "Loaded preset {preset} ({count} bodies)")
            }
            Diagnostic::Merged {
                survivor,
                absorbed,
                mass,
                ..
            } => write!(
                f,
                "Collision: {survivor} absorbed {absorbed}, new mass {mass:.3e} kg"
            ),
            Diagnostic::Deleted { name, .. } => write!(f, "Deleted {name}"),
            Diagnostic::Paused => f.write_str("Simulation paused"),
            Diagnostic::Resumed => f.write_str("Simulation resumed"),
            Diagnostic::Reset { removed } => write!(f, "Reset: removed {removed} bodies"),
            Diagnostic::TimeStepChanged { seconds } => {
                write!(f, "Time step set to {seconds} s")
            }
            Diagnostic::Rejected { reason } => write!(f, "Rejected: {reason}"),
        }
    }
}

/// Bounded sink of [`Diagnostic`]s
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
    dropped: usize,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `diagnostic`, evicting the oldest entry when full
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries evicted since the last drain
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Takes every entry still held, oldest first
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.dropped = 0;
        self.entries.drain(..).collect()
    }
}
