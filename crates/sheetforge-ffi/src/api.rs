//! `sf_*` entry points.
//!
//! No panic unwinds into the caller: every entry point runs inside
//! `catch_unwind`. A panic during a cell operation is recorded on the engine
//! as an internal error.

use std::any::Any;
use std::ffi::{CStr, c_char, c_int};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use sheetforge_engine::engine::NameError;
use sheetforge_engine::{Engine, EngineError, Status};
use tracing::error;

use crate::handles;
use crate::types::{SfEngine, SfEngineOptions, SfErrorCode, describe};

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `f` against the engine behind `handle`, converting the outcome to a code.
fn with_engine(handle: *const SfEngine, f: impl FnOnce(&Engine) -> Status) -> SfErrorCode {
    let Some(engine) = handles::resolve(handle) else {
        return SfErrorCode::InvalidEngineHandle;
    };
    match catch_unwind(AssertUnwindSafe(|| f(&engine))) {
        Ok(status) => status.into(),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(engine = engine.id(), panic = %message, "panic caught at C boundary");
            let report = catch_unwind(AssertUnwindSafe(|| {
                engine.report(EngineError::Internal(message))
            }));
            report.unwrap_or(Status::Internal).into()
        }
    }
}

/// Decode a C string cell name.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
unsafe fn decode_name<'a>(name: *const c_char) -> Result<&'a str, EngineError> {
    if name.is_null() {
        return Err(EngineError::InvalidName {
            name: String::new(),
            reason: NameError::Missing,
        });
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let raw = unsafe { CStr::from_ptr(name) };
    raw.to_str().map_err(|_| EngineError::InvalidName {
        name: raw.to_string_lossy().into_owned(),
        reason: NameError::NotUtf8,
    })
}

fn status_of<T>(result: sheetforge_engine::Result<T>) -> Status {
    match result {
        Ok(_) => Status::Ok,
        Err(e) => e.status(),
    }
}

/// Create an engine with default options. Returns null on failure.
#[unsafe(no_mangle)]
pub extern "C" fn sf_create_engine() -> *mut SfEngine {
    catch_unwind(|| handles::register(Engine::new())).unwrap_or(ptr::null_mut())
}

/// Create an engine with explicit options (null means defaults).
/// Returns null on failure or if an option is out of range.
///
/// # Safety
///
/// `options` must be null or point to a valid `SF_EngineOptions`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_create_engine_with_options(
    options: *const SfEngineOptions,
) -> *mut SfEngine {
    let options = if options.is_null() {
        SfEngineOptions::default()
    } else {
        // SAFETY: non-null and valid per the caller's contract.
        unsafe { *options }
    };
    let result = catch_unwind(|| {
        let config = options.to_config()?;
        let engine = Engine::with_config(config).ok()?;
        Some(handles::register(engine))
    });
    result.ok().flatten().unwrap_or(ptr::null_mut())
}

/// Destroy an engine and every cell it owns. Unknown, null or already
/// destroyed handles are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn sf_destroy_engine(engine: *mut SfEngine) {
    let _ = catch_unwind(|| {
        if let Some(engine) = handles::release(engine) {
            // In-flight calls on other threads keep their own reference.
            if let Ok(engine) = std::sync::Arc::try_unwrap(engine) {
                engine.destroy();
            }
        }
    });
}

/// Create a value cell, or redefine an existing one.
///
/// Returns `SF_ERR_DUPLICATE_CELL_NAME` for a redefinition. Under the
/// overwrite policy the value has still been written.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_create_value_cell(
    engine: *mut SfEngine,
    name: *const c_char,
    value: f64,
) -> SfErrorCode {
    with_engine(engine, |engine| {
        // SAFETY: forwarded from this function's contract.
        match unsafe { decode_name(name) } {
            Ok(name) => engine
                .create_value_cell(name, value)
                .map_or_else(|e| e.status(), |write| write.status()),
            Err(e) => engine.report(e),
        }
    })
}

/// Assign a new value to an existing cell.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_set_cell_value(
    engine: *mut SfEngine,
    name: *const c_char,
    value: f64,
) -> SfErrorCode {
    with_engine(engine, |engine| {
        // SAFETY: forwarded from this function's contract.
        match unsafe { decode_name(name) } {
            Ok(name) => status_of(engine.set_cell_value(name, value)),
            Err(e) => engine.report(e),
        }
    })
}

/// Read a cell's value into `out`. `out` is left untouched on failure.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string; `out` must be
/// null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_get_cell_value(
    engine: *const SfEngine,
    name: *const c_char,
    out: *mut f64,
) -> SfErrorCode {
    with_engine(engine, |engine| {
        // SAFETY: forwarded from this function's contract.
        let name = match unsafe { decode_name(name) } {
            Ok(name) => name,
            Err(e) => return engine.report(e),
        };
        if out.is_null() {
            return engine.report(EngineError::InvalidArgument("value out-pointer is null"));
        }
        match engine.get_cell_value(name) {
            Ok(value) => {
                // SAFETY: non-null and writable per the caller's contract.
                unsafe { out.write(value) };
                Status::Ok
            }
            Err(e) => e.status(),
        }
    })
}

/// Remove a cell.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_remove_cell(engine: *mut SfEngine, name: *const c_char) -> SfErrorCode {
    with_engine(engine, |engine| {
        // SAFETY: forwarded from this function's contract.
        match unsafe { decode_name(name) } {
            Ok(name) => status_of(engine.remove_cell(name)),
            Err(e) => engine.report(e),
        }
    })
}

/// Whether a cell exists. False for invalid handles or names.
/// Does not change `sf_last_error`.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sf_has_cell(engine: *const SfEngine, name: *const c_char) -> bool {
    let Some(engine) = handles::resolve(engine) else {
        return false;
    };
    catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: forwarded from this function's contract.
        unsafe { decode_name(name) }.is_ok_and(|name| engine.contains(name))
    }))
    .unwrap_or(false)
}

/// Number of cells. Zero for invalid handles. Does not change `sf_last_error`.
#[unsafe(no_mangle)]
pub extern "C" fn sf_cell_count(engine: *const SfEngine) -> usize {
    handles::resolve(engine).map_or(0, |engine| engine.len())
}

/// Remove every cell.
#[unsafe(no_mangle)]
pub extern "C" fn sf_reset_engine(engine: *mut SfEngine) -> SfErrorCode {
    with_engine(engine, |engine| {
        engine.reset();
        Status::Ok
    })
}

/// Message describing the most recent operation on `engine`, empty if it
/// succeeded. Owned by the engine; valid until the next call on the same
/// handle or its destruction.
#[unsafe(no_mangle)]
pub extern "C" fn sf_last_error(engine: *const SfEngine) -> *const c_char {
    let Some(engine) = handles::resolve(engine) else {
        return describe(Status::InvalidEngineHandle.code()).as_ptr();
    };
    engine.error_channel().message().as_ptr()
}

/// Status of the most recent operation on `engine`.
#[unsafe(no_mangle)]
pub extern "C" fn sf_last_error_code(engine: *const SfEngine) -> SfErrorCode {
    match handles::resolve(engine) {
        Some(engine) => engine.last_status().into(),
        None => SfErrorCode::InvalidEngineHandle,
    }
}

/// Static description of a status code.
#[unsafe(no_mangle)]
pub extern "C" fn sf_strerror(code: c_int) -> *const c_char {
    describe(code).as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_handles_common_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn panics_become_internal_errors() {
        let handle = sf_create_engine();
        let code = with_engine(handle, |_| panic!("registry exploded"));
        assert_eq!(code, SfErrorCode::Internal);
        assert_eq!(sf_last_error_code(handle), SfErrorCode::Internal);
        let message = unsafe { CStr::from_ptr(sf_last_error(handle)) };
        assert_eq!(message.to_str().unwrap(), "internal error: registry exploded");
        sf_destroy_engine(handle);
    }

    #[test]
    fn decode_name_rejects_null_and_invalid_utf8() {
        let err = unsafe { decode_name(ptr::null()) }.unwrap_err();
        assert_eq!(err.status(), Status::InvalidName);

        let bytes = b"bad\xffname\0";
        let err = unsafe { decode_name(bytes.as_ptr().cast()) }.unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidName {
                reason: NameError::NotUtf8,
                ..
            }
        ));
    }
}
