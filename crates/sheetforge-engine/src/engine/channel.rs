//! Per-engine error channel.
//!
//! Holds the status and message of the most recent operation. Successful
//! operations reset it; there is no history.

use std::ffi::{CStr, CString};

use crate::error::{EngineError, Status};

#[derive(Debug)]
pub struct ErrorChannel {
    status: Status,
    message: CString,
}

impl ErrorChannel {
    pub fn new() -> Self {
        ErrorChannel {
            status: Status::Ok,
            message: CString::default(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Message of the last operation, empty when it succeeded.
    pub fn message(&self) -> &CStr {
        &self.message
    }

    pub fn message_str(&self) -> &str {
        self.message.to_str().unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.status = Status::Ok;
        if !self.message.is_empty() {
            self.message = CString::default();
        }
    }

    pub(crate) fn set(&mut self, status: Status, message: &str) {
        self.status = status;
        self.message = CString::new(message).unwrap_or_else(|e| {
            let mut bytes = e.into_vec();
            bytes.retain(|&b| b != 0);
            CString::new(bytes).unwrap_or_default()
        });
    }

    pub(crate) fn fail(&mut self, error: &EngineError) {
        self.set(error.status(), &error.to_string());
    }

    /// Record the outcome of an operation.
    pub(crate) fn record<T>(&mut self, result: &Result<T, EngineError>) {
        match result {
            Ok(_) => self.clear(),
            Err(e) => self.fail(e),
        }
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}
