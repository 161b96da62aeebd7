//! C ABI for the Sheetforge cell engine.
//!
//! ```c
//! SF_Engine* engine = sf_create_engine();
//! sf_create_value_cell(engine, "life", 105.0);
//!
//! double value = 0.0;
//! if (sf_get_cell_value(engine, "life", &value) != SF_OK) {
//!     printf("Error: %s\n", sf_last_error(engine));
//! }
//!
//! // Redefinition overwrites but reports SF_ERR_DUPLICATE_CELL_NAME.
//! sf_create_value_cell(engine, "life", 100.0);
//! printf("Error: %s\n", sf_last_error(engine));
//!
//! sf_destroy_engine(engine);
//! ```
//!
//! Errors never unwind across the boundary. Every call returns an
//! `SF_ErrorCode` (or a sentinel) and records a message that
//! `sf_last_error` returns until the next call on the same handle.
//! The declarations live in `include/sheetforge.h`.

mod api;
mod handles;
mod logging;
mod types;

pub use api::*;
pub use logging::{LOG_ENV, sf_init_logging};
pub use types::{
    SF_REDEFINE_OVERWRITE, SF_REDEFINE_REJECT, SfEngine, SfEngineOptions, SfErrorCode,
};

/// C ABI version. Bumped on any incompatible change.
pub const SF_ABI_VERSION: u32 = 1;

#[unsafe(no_mangle)]
pub extern "C" fn sf_abi_version() -> u32 {
    SF_ABI_VERSION
}
