//! sheetforge_engine - Named value cells with a per-engine error channel.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ConfigError, EngineConfig, RedefinitionPolicy};
pub use engine::{CellSnapshot, CellWrite, Engine};
pub use error::{EngineError, Result, Status};
