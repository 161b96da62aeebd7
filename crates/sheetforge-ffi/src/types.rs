//! C ABI types.

use std::ffi::{CStr, c_int};

use sheetforge_engine::{EngineConfig, RedefinitionPolicy, Status};

/// Status codes returned by the C ABI functions.
///
/// Mirrors [`Status`] value for value.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SfErrorCode {
    Ok = 0,
    InvalidName = 100,
    InvalidValue = 101,
    CellNotFound = 102,
    DuplicateCellName = 103,
    AllocationFailed = 200,
    InvalidEngineHandle = 1000,
    InvalidArgument = 1001,
    Internal = 1002,
}

impl From<Status> for SfErrorCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => SfErrorCode::Ok,
            Status::InvalidName => SfErrorCode::InvalidName,
            Status::InvalidValue => SfErrorCode::InvalidValue,
            Status::CellNotFound => SfErrorCode::CellNotFound,
            Status::DuplicateCellName => SfErrorCode::DuplicateCellName,
            Status::AllocationFailed => SfErrorCode::AllocationFailed,
            Status::InvalidEngineHandle => SfErrorCode::InvalidEngineHandle,
            Status::InvalidArgument => SfErrorCode::InvalidArgument,
            Status::Internal => SfErrorCode::Internal,
        }
    }
}

/// Static description of a status code.
pub(crate) fn describe(code: c_int) -> &'static CStr {
    match Status::from_code(code) {
        Some(Status::Ok) => c"no error",
        Some(Status::InvalidName) => c"cell name is empty or malformed",
        Some(Status::InvalidValue) => c"cell value is not a finite number",
        Some(Status::CellNotFound) => c"cell does not exist",
        Some(Status::DuplicateCellName) => c"a cell with this name already exists",
        Some(Status::AllocationFailed) => c"could not allocate storage",
        Some(Status::InvalidEngineHandle) => c"engine handle is null, unknown or destroyed",
        Some(Status::InvalidArgument) => c"invalid argument",
        Some(Status::Internal) => c"internal engine error",
        None => c"unknown error code",
    }
}

/// `redefinition` values of [`SfEngineOptions`].
pub const SF_REDEFINE_OVERWRITE: c_int = 0;
pub const SF_REDEFINE_REJECT: c_int = 1;

/// Engine creation options.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SfEngineOptions {
    /// `SF_REDEFINE_OVERWRITE` or `SF_REDEFINE_REJECT`
    pub redefinition: c_int,
    /// Accept NaN and infinities
    pub allow_non_finite: bool,
    /// Registry capacity, at least 1
    pub max_cells: usize,
}

impl Default for SfEngineOptions {
    fn default() -> Self {
        let config = EngineConfig::default();
        SfEngineOptions {
            redefinition: SF_REDEFINE_OVERWRITE,
            allow_non_finite: config.allow_non_finite,
            max_cells: config.max_cells,
        }
    }
}

impl SfEngineOptions {
    /// Convert to an engine config. `None` if a field is out of range.
    pub(crate) fn to_config(self) -> Option<EngineConfig> {
        let redefinition = match self.redefinition {
            SF_REDEFINE_OVERWRITE => RedefinitionPolicy::Overwrite,
            SF_REDEFINE_REJECT => RedefinitionPolicy::Reject,
            _ => return None,
        };
        let config = EngineConfig {
            redefinition,
            allow_non_finite: self.allow_non_finite,
            max_cells: self.max_cells,
        };
        config.validate().ok()?;
        Some(config)
    }
}

/// Opaque engine handle.
///
/// Created by `sf_create_engine`, freed by `sf_destroy_engine`. Never
/// dereferenced; the pointer value is a key into the handle table.
#[repr(C)]
pub struct SfEngine {
    _private: [u8; 0],
}
