//! Logging configuration
//!
//! Initializes tracing for the application. Output goes to stderr so it
//! never interleaves with prompts.

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "YAML_TO_SCRIPT_LOG";

/// Initializes logging with the specified level
///
/// `YAML_TO_SCRIPT_LOG` overrides `level` when set. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .try_init();
}

/// Maps a `-v` count onto a level, falling back to `configured`
#[must_use]
pub fn level_for_verbosity(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 | 1 => configured,
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        // Just verify it doesn't panic
        init_logging("debug");
        init_logging("info");
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(1, "info"), "info");
        assert_eq!(level_for_verbosity(2, "info"), "debug");
        assert_eq!(level_for_verbosity(5, "warn"), "trace");
    }
}
