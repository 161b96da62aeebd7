//! The engine: one registry and one error channel behind one lock.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use super::cell::CellSnapshot;
use super::channel::ErrorChannel;
use super::registry::{CellRegistry, CellWrite};
use crate::config::{ConfigError, EngineConfig};
use crate::error::{EngineError, Result, Status};

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct EngineState {
    registry: CellRegistry,
    channel: ErrorChannel,
}

impl EngineState {
    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.channel.record(&result);
        result
    }
}

/// A named-cell engine.
///
/// Every operation that touches cells also records its outcome in the
/// engine's error channel, under the same lock, so [`Engine::last_error`]
/// always describes the most recently completed operation.
#[derive(Debug)]
pub struct Engine {
    id: u64,
    state: Mutex<EngineState>,
}

impl Engine {
    pub fn new() -> Engine {
        Self::build(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> std::result::Result<Engine, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Engine {
        let id = NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(engine = id, ?config, "engine created");
        Engine {
            id,
            state: Mutex::new(EngineState {
                registry: CellRegistry::new(&config),
                channel: ErrorChannel::new(),
            }),
        }
    }

    /// Release the engine and every cell it owns.
    pub fn destroy(self) {
        let cells = self.state.lock().registry.len();
        debug!(engine = self.id, cells, "engine destroyed");
    }

    /// Process-unique id, used to correlate log lines.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Create a value cell, or redefine an existing one.
    ///
    /// A redefinition under the overwrite policy returns `Ok(CellWrite::Redefined)`
    /// and leaves an advisory `DuplicateCellName` in the error channel.
    pub fn create_value_cell(&self, name: &str, value: f64) -> Result<CellWrite> {
        let mut state = self.state.lock();
        let result = state.registry.create_value(name, value);
        match &result {
            Ok(CellWrite::Inserted) => {
                debug!(engine = self.id, cell = name, value, "cell created");
                state.channel.clear();
            }
            Ok(CellWrite::Redefined { previous }) => {
                warn!(engine = self.id, cell = name, previous, value, "cell redefined");
                let duplicate = EngineError::DuplicateCellName {
                    name: name.to_string(),
                };
                state.channel.set(
                    Status::DuplicateCellName,
                    &format!("{duplicate}; value redefined from {previous} to {value}"),
                );
            }
            Err(e) => {
                debug!(engine = self.id, cell = name, error = %e, "cell creation rejected");
                state.channel.fail(e);
            }
        }
        result
    }

    /// Assign a new value to an existing cell. Returns the previous value.
    pub fn set_cell_value(&self, name: &str, value: f64) -> Result<f64> {
        let mut state = self.state.lock();
        let result = state.registry.assign(name, value);
        if let Ok(previous) = &result {
            debug!(engine = self.id, cell = name, previous, value, "cell assigned");
        }
        state.finish(result)
    }

    pub fn get_cell_value(&self, name: &str) -> Result<f64> {
        let mut state = self.state.lock();
        let result = state.registry.lookup(name).map(|cell| cell.value());
        trace!(engine = self.id, cell = name, ok = result.is_ok(), "cell read");
        state.finish(result)
    }

    /// Full record of a cell.
    pub fn cell(&self, name: &str) -> Result<CellSnapshot> {
        let mut state = self.state.lock();
        let result = state.registry.lookup(name).map(|cell| cell.snapshot());
        state.finish(result)
    }

    /// Remove a cell. Returns its last value.
    pub fn remove_cell(&self, name: &str) -> Result<f64> {
        let mut state = self.state.lock();
        let result = state.registry.remove(name);
        if result.is_ok() {
            debug!(engine = self.id, cell = name, "cell removed");
        }
        state.finish(result)
    }

    /// Remove every cell. Returns how many were removed.
    pub fn reset(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.registry.clear();
        state.channel.clear();
        debug!(engine = self.id, removed, "engine reset");
        removed
    }

    /// Record an error raised outside the registry, such as a bad argument
    /// decoded at a language boundary. Returns its status.
    pub fn report(&self, error: EngineError) -> Status {
        let mut state = self.state.lock();
        state.channel.fail(&error);
        error.status()
    }

    /// Whether `name` exists. Like `len`, `is_empty` and `names`, this leaves
    /// the error channel as it was.
    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().registry.contains(name)
    }

    pub fn len(&self) -> usize {
        self.state.lock().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().registry.is_empty()
    }

    /// All cell names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.state.lock().registry.names()
    }

    /// Message of the most recent operation, empty if it succeeded.
    pub fn last_error(&self) -> String {
        self.state.lock().channel.message_str().to_string()
    }

    pub fn last_status(&self) -> Status {
        self.state.lock().channel.status()
    }

    /// Borrow the error channel. The engine stays locked while the guard lives.
    pub fn error_channel(&self) -> MappedMutexGuard<'_, ErrorChannel> {
        MutexGuard::map(self.state.lock(), |state| &mut state.channel)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
