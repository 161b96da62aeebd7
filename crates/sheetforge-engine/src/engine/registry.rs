//! Name-keyed cell storage.
//!
//! The registry owns every cell of one engine and enforces the identity,
//! redefinition, value and capacity rules. It is not synchronized itself;
//! the engine wraps it together with the error channel in a single lock.

use std::collections::HashMap;

use super::cell::{Cell, Change};
use super::name::validate_name;
use crate::config::{EngineConfig, RedefinitionPolicy};
use crate::error::{EngineError, Result, Status};

/// Result of a successful `create_value_cell`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CellWrite {
    /// A new cell was inserted.
    Inserted,
    /// An existing cell was overwritten.
    Redefined { previous: f64 },
}

impl CellWrite {
    /// Status reported to callers: redefinition is advisory.
    pub fn status(&self) -> Status {
        match self {
            CellWrite::Inserted => Status::Ok,
            CellWrite::Redefined { .. } => Status::DuplicateCellName,
        }
    }
}

#[derive(Debug)]
pub struct CellRegistry {
    cells: HashMap<String, Cell>,
    redefinition: RedefinitionPolicy,
    allow_non_finite: bool,
    max_cells: usize,
}

impl CellRegistry {
    pub fn new(config: &EngineConfig) -> Self {
        CellRegistry {
            cells: HashMap::new(),
            redefinition: config.redefinition,
            allow_non_finite: config.allow_non_finite,
            max_cells: config.max_cells,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cell names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cells.keys().cloned().collect();
        names.sort();
        names
    }

    /// Look up a cell, failing with `CellNotFound`.
    pub fn lookup(&self, name: &str) -> Result<&Cell> {
        validate_name(name)?;
        self.cells.get(name).ok_or_else(|| EngineError::CellNotFound {
            name: name.to_string(),
        })
    }

    /// Insert a value cell, or redefine it according to the policy.
    pub fn create_value(&mut self, name: &str, value: f64) -> Result<CellWrite> {
        validate_name(name)?;
        self.check_value(name, value)?;

        if let Some(cell) = self.cells.get_mut(name) {
            return match self.redefinition {
                RedefinitionPolicy::Overwrite => {
                    let previous = cell.write(value, Change::Redefined);
                    Ok(CellWrite::Redefined { previous })
                }
                RedefinitionPolicy::Reject => Err(EngineError::DuplicateCellName {
                    name: name.to_string(),
                }),
            };
        }

        if self.cells.len() >= self.max_cells {
            return Err(EngineError::CapacityExceeded {
                name: name.to_string(),
                max: self.max_cells,
            });
        }

        // Reserve everything up front so a failed allocation leaves no partial insert.
        let key = owned_name(name)?;
        let cell_name = owned_name(name)?;
        self.cells
            .try_reserve(1)
            .map_err(|_| EngineError::AllocationFailed {
                name: name.to_string(),
            })?;
        self.cells.insert(key, Cell::new_value(cell_name, value));
        Ok(CellWrite::Inserted)
    }

    /// Assign a new value to an existing cell. Returns the previous value.
    pub fn assign(&mut self, name: &str, value: f64) -> Result<f64> {
        validate_name(name)?;
        self.check_value(name, value)?;
        let cell = self
            .cells
            .get_mut(name)
            .ok_or_else(|| EngineError::CellNotFound {
                name: name.to_string(),
            })?;
        Ok(cell.write(value, Change::Assigned))
    }

    /// Remove a cell. Returns its last value.
    pub fn remove(&mut self, name: &str) -> Result<f64> {
        validate_name(name)?;
        self.cells
            .remove(name)
            .map(|cell| cell.value())
            .ok_or_else(|| EngineError::CellNotFound {
                name: name.to_string(),
            })
    }

    /// Drop every cell. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.cells.len();
        self.cells.clear();
        removed
    }

    fn check_value(&self, name: &str, value: f64) -> Result<()> {
        if !self.allow_non_finite && !value.is_finite() {
            return Err(EngineError::NonFiniteValue {
                name: name.to_string(),
                value,
            });
        }
        Ok(())
    }
}

fn owned_name(name: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(name.len())
        .map_err(|_| EngineError::AllocationFailed {
            name: String::new(),
        })?;
    owned.push_str(name);
    Ok(owned)
}
