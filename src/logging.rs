use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SHEETFORGE_LOG";

/// Install the stderr subscriber. `SHEETFORGE_LOG` wins over the configured
/// filter; both fall back to `warn`.
pub fn init_logging(configured: Option<&str>) -> Vec<String> {
    let mut warnings = Vec::new();
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            warnings.push(format!("Ignoring {}={:?}: {}", LOG_ENV, directive, err));
            EnvFilter::new("warn")
        }),
        Err(_) => match configured {
            Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
                warnings.push(format!("Ignoring log filter {:?}: {}", directive, err));
                EnvFilter::new("warn")
            }),
            None => EnvFilter::new("warn"),
        },
    };

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        warnings.push(format!("Failed to install logger: {}", err));
    }
    warnings
}
