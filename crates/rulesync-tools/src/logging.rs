use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact `fmt` subscriber for binaries embedding rulesync.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Fails if a
/// global subscriber is already set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_default("info")
}

/// Same as [`init`] with a caller-chosen fallback directive
/// (e.g. `"rulesync_core=debug"`).
pub fn init_with_default(directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directive))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn test_logging_init_twice_errors() {
        // Another test may already have installed a subscriber
        let _ = init();
        assert!(init_with_default("debug").is_err());

        info!(tool = "cursor", "generated rules");
        debug!(path = ".cursor/rules/style.mdc", "wrote file");
    }
}
