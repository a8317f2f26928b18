//! Device capabilities the screens depend on: location, file picking and
//! sharing. Each is a trait with a simulated adapter configured at startup.

use std::collections::VecDeque;

use forestops_core::map::Coordinate;
use tracing::{info, warn};

use crate::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

pub trait LocationProvider {
    fn request_permission(&mut self) -> Permission;
    fn current_position(&mut self) -> Result<Coordinate, ServiceError>;
}

/// Reports a fixed position, or refuses permission.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    position: Coordinate,
    granted: bool,
}

impl FixedLocation {
    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            granted: true,
        }
    }

    pub fn denied() -> Self {
        Self {
            position: Coordinate::new(0.0, 0.0),
            granted: false,
        }
    }
}

impl LocationProvider for FixedLocation {
    fn request_permission(&mut self) -> Permission {
        if self.granted {
            Permission::Granted
        } else {
            warn!("location permission denied");
            Permission::Denied
        }
    }

    fn current_position(&mut self) -> Result<Coordinate, ServiceError> {
        if !self.granted {
            return Err(ServiceError::Unavailable("location permission".into()));
        }
        Ok(self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(String),
    Cancelled,
}

pub trait FilePicker {
    fn pick(&mut self) -> Result<PickOutcome, ServiceError>;
}

/// Hands out a queue of file names, then reports cancellation.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    queue: VecDeque<String>,
    broken: bool,
}

impl ScriptedPicker {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            queue: names.into_iter().collect(),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            queue: VecDeque::new(),
            broken: true,
        }
    }
}

impl FilePicker for ScriptedPicker {
    fn pick(&mut self) -> Result<PickOutcome, ServiceError> {
        if self.broken {
            return Err(ServiceError::Unavailable("file picker".into()));
        }
        Ok(match self.queue.pop_front() {
            Some(name) => {
                info!(%name, "file picked");
                PickOutcome::Picked(name)
            }
            None => PickOutcome::Cancelled,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Dismissed,
}

pub trait ShareService {
    fn share(&mut self, name: &str) -> Result<ShareOutcome, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SimulatedShare {
    available: bool,
}

impl SimulatedShare {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

impl ShareService for SimulatedShare {
    fn share(&mut self, name: &str) -> Result<ShareOutcome, ServiceError> {
        if !self.available {
            warn!(name, "share target unavailable");
            return Err(ServiceError::Unavailable("sharing".into()));
        }
        info!(name, "file shared");
        Ok(ShareOutcome::Shared)
    }
}
