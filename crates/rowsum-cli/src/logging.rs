use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "info,rowsum=debug",
        (false, _) => "trace",
    }
}

/// Logs go to stderr so the report on stdout stays machine-readable.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0, false), "info");
        assert_eq!(default_filter(1, false), "info,rowsum=debug");
        assert_eq!(default_filter(3, false), "trace");
        assert_eq!(default_filter(0, true), "warn");
    }
}
