//! Cell engine API.
//!
//! - [`Cell`], [`CellKind`], [`Change`], [`CellSnapshot`] - Cell data and bookkeeping
//! - [`check_name`] - Cell name validation
//! - [`CellRegistry`] - Name-keyed storage enforcing redefinition and capacity rules
//! - [`ErrorChannel`] - Status and message of the most recent operation
//! - [`Engine`] - Thread-safe facade owning one registry and one error channel

mod cell;
mod channel;
mod facade;
mod name;
mod registry;

pub use cell::{Cell, CellKind, CellSnapshot, Change};
pub use channel::ErrorChannel;
pub use facade::Engine;
pub use name::{MAX_NAME_LEN, NameError, check_name};
pub use registry::{CellRegistry, CellWrite};
