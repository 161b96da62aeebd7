//! Error types and status codes for the Sheetforge engine.

use std::fmt;

use thiserror::Error;

use crate::engine::NameError;

/// Outcome code of an engine operation.
///
/// Discriminants are the values exposed across the C boundary and must not change.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Ok = 0,

    InvalidName = 100,
    InvalidValue = 101,
    CellNotFound = 102,
    /// Advisory under the overwrite policy, a hard failure under the reject policy.
    DuplicateCellName = 103,

    AllocationFailed = 200,

    InvalidEngineHandle = 1000,
    InvalidArgument = 1001,
    Internal = 1002,
}

impl Status {
    pub const ALL: [Status; 9] = [
        Status::Ok,
        Status::InvalidName,
        Status::InvalidValue,
        Status::CellNotFound,
        Status::DuplicateCellName,
        Status::AllocationFailed,
        Status::InvalidEngineHandle,
        Status::InvalidArgument,
        Status::Internal,
    ];

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Stable identifier, as used in log fields and the command driver.
    pub fn name(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::InvalidName => "InvalidName",
            Status::InvalidValue => "InvalidValue",
            Status::CellNotFound => "CellNotFound",
            Status::DuplicateCellName => "DuplicateCellName",
            Status::AllocationFailed => "AllocationFailed",
            Status::InvalidEngineHandle => "InvalidEngineHandle",
            Status::InvalidArgument => "InvalidArgument",
            Status::Internal => "Internal",
        }
    }

    /// Human-readable description of the code itself (not of a specific failure).
    pub fn description(self) -> &'static str {
        match self {
            Status::Ok => "no error",
            Status::InvalidName => "cell name is empty or malformed",
            Status::InvalidValue => "cell value is not a finite number",
            Status::CellNotFound => "cell does not exist",
            Status::DuplicateCellName => "a cell with this name already exists",
            Status::AllocationFailed => "could not allocate storage",
            Status::InvalidEngineHandle => "engine handle is null, unknown or destroyed",
            Status::InvalidArgument => "invalid argument",
            Status::Internal => "internal engine error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur in engine operations.
///
/// The `Display` text is what the engine's error channel records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid cell name {name:?}: {reason}")]
    InvalidName { name: String, reason: NameError },

    #[error("cell {name:?} cannot hold non-finite value {value}")]
    NonFiniteValue { name: String, value: f64 },

    #[error("cell {name:?} does not exist")]
    CellNotFound { name: String },

    #[error("cell {name:?} already exists")]
    DuplicateCellName { name: String },

    #[error("cell limit of {max} reached, cannot create {name:?}")]
    CapacityExceeded { name: String, max: usize },

    #[error("out of memory while storing cell {name:?}")]
    AllocationFailed { name: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn status(&self) -> Status {
        match self {
            EngineError::InvalidName { .. } => Status::InvalidName,
            EngineError::NonFiniteValue { .. } => Status::InvalidValue,
            EngineError::CellNotFound { .. } => Status::CellNotFound,
            EngineError::DuplicateCellName { .. } => Status::DuplicateCellName,
            EngineError::CapacityExceeded { .. } | EngineError::AllocationFailed { .. } => {
                Status::AllocationFailed
            }
            EngineError::InvalidArgument(_) => Status::InvalidArgument,
            EngineError::Internal(_) => Status::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_through_from_code() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(42), None);
    }

    #[test]
    fn only_ok_is_ok() {
        assert!(Status::Ok.is_ok());
        assert!(Status::ALL.iter().skip(1).all(|s| !s.is_ok()));
    }

    #[test]
    fn capacity_and_oom_share_allocation_status() {
        let full = EngineError::CapacityExceeded {
            name: "x".into(),
            max: 1,
        };
        let oom = EngineError::AllocationFailed { name: "x".into() };
        assert_eq!(full.status(), Status::AllocationFailed);
        assert_eq!(oom.status(), Status::AllocationFailed);
    }

    #[test]
    fn messages_quote_and_escape_names() {
        let err = EngineError::CellNotFound {
            name: "a\0b".into(),
        };
        let msg = err.to_string();
        assert_eq!(msg, r#"cell "a\0b" does not exist"#);
        assert!(!msg.contains('\0'));
    }
}
