//! Cell data structures.
//!
//! - [`CellKind`] - What produces a cell's value (only caller-assigned values for now)
//! - [`Change`] - How a cell was last modified
//! - [`Cell`] - A named scalar plus its modification bookkeeping
//! - [`CellSnapshot`] - An owned copy of a cell handed out to callers

use chrono::{DateTime, Utc};

/// The kind of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Value assigned directly by the caller.
    Value,
}

/// The operation that last wrote a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    /// Inserted by `create_value_cell`.
    Created,
    /// Overwritten by `create_value_cell` on an existing name.
    Redefined,
    /// Updated in place by `set_cell_value`.
    Assigned,
}

/// A named cell owned by a registry.
#[derive(Debug)]
pub struct Cell {
    name: String,
    kind: CellKind,
    value: f64,
    revision: u64,
    last_change: Change,
    modified_at: DateTime<Utc>,
}

impl Cell {
    pub(crate) fn new_value(name: String, value: f64) -> Cell {
        #[cfg(test)]
        live::created(&name);

        Cell {
            name,
            kind: CellKind::Value,
            value,
            revision: 1,
            last_change: Change::Created,
            modified_at: Utc::now(),
        }
    }

    /// Write a new value, recording how it happened.
    ///
    /// Redefinition also reaffirms the cell as a value cell.
    pub(crate) fn write(&mut self, value: f64, change: Change) -> f64 {
        let previous = self.value;
        if change == Change::Redefined {
            self.kind = CellKind::Value;
        }
        self.value = value;
        self.revision += 1;
        self.last_change = change;
        self.modified_at = Utc::now();
        previous
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_change(&self) -> Change {
        self.last_change
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            name: self.name.clone(),
            kind: self.kind,
            value: self.value,
            revision: self.revision,
            last_change: self.last_change,
            modified_at: self.modified_at,
        }
    }
}

#[cfg(test)]
impl Drop for Cell {
    fn drop(&mut self) {
        live::dropped(&self.name);
    }
}

/// Owned copy of a cell's state at the time it was read.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSnapshot {
    pub name: String,
    pub kind: CellKind,
    pub value: f64,
    pub revision: u64,
    pub last_change: Change,
    pub modified_at: DateTime<Utc>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_value_cell_starts_at_revision_one() {
        let cell = Cell::new_value("life".into(), 105.0);
        assert_eq!(cell.name(), "life");
        assert_eq!(cell.kind(), CellKind::Value);
        assert_eq!(cell.value(), 105.0);
        assert_eq!(cell.revision(), 1);
        assert_eq!(cell.last_change(), Change::Created);
    }

    #[test]
    fn write_bumps_revision_and_returns_previous() {
        let mut cell = Cell::new_value("life".into(), 105.0);
        let before = cell.modified_at();

        assert_eq!(cell.write(100.0, Change::Redefined), 105.0);
        assert_eq!(cell.value(), 100.0);
        assert_eq!(cell.revision(), 2);
        assert_eq!(cell.last_change(), Change::Redefined);
        assert!(cell.modified_at() >= before);

        assert_eq!(cell.write(1.5, Change::Assigned), 100.0);
        assert_eq!(cell.revision(), 3);
        assert_eq!(cell.last_change(), Change::Assigned);
    }

    #[test]
    fn snapshot_copies_every_field() {
        let cell = Cell::new_value("x".into(), 2.0);
        let snap = cell.snapshot();
        assert_eq!(snap.name, "x");
        assert_eq!(snap.value, 2.0);
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.modified_at, cell.modified_at());
    }

    #[test]
    fn live_counter_tracks_drops() {
        let a = Cell::new_value("drops_a".into(), 1.0);
        let b = Cell::new_value("drops_b".into(), 2.0);
        assert_eq!(live::count("drops_"), 2);
        drop(a);
        assert_eq!(live::count("drops_"), 1);
        drop(b);
        assert_eq!(live::count("drops_"), 0);
    }
}
