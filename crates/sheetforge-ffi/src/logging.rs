//! Optional `tracing` subscriber for embedders.

use std::panic::catch_unwind;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::types::SfErrorCode;

/// Environment variable holding an `EnvFilter` directive, e.g. `sheetforge_engine=debug`.
pub const LOG_ENV: &str = "SHEETFORGE_LOG";

/// Install a stderr `tracing` subscriber filtered by `SHEETFORGE_LOG`
/// (default `warn`).
///
/// Repeated calls return the first call's result. Returns `SF_ERR_INTERNAL`
/// if the host process already installed a global subscriber.
#[unsafe(no_mangle)]
pub extern "C" fn sf_init_logging() -> SfErrorCode {
    static INSTALLED: OnceLock<SfErrorCode> = OnceLock::new();
    *INSTALLED.get_or_init(|| {
        catch_unwind(|| {
            let filter =
                EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
        })
        .map_or(SfErrorCode::Internal, |installed| match installed {
            Ok(()) => SfErrorCode::Ok,
            Err(_) => SfErrorCode::Internal,
        })
    })
}
