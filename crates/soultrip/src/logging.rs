//! Tracing setup shared by the server and the CLI.
//!
//! The verbosity flags pick a filter for this crate and for the HTTP request
//! spans; `RUST_LOG` replaces that filter entirely when it is set.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above; requests are not logged.
    #[default]
    Normal,
    /// Debug and above, one line per request.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Level applied to this crate.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    ///
    /// Request spans from `tower_http` only show from `-v` up; SMTP chatter
    /// from `lettre` stays at warnings unless tracing.
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.level();
        let http = if self >= Self::Verbose { level } else { Level::WARN };
        let mail = if self == Self::Trace { level } else { Level::WARN };
        format!("soultrip={level},tower_http={http},lettre={mail}")
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global subscriber. Later calls are ignored.
///
/// # Examples
///
/// ```no_run
/// use soultrip::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    // Targets only help once several crates are logging.
    let layer = fmt::layer()
        .with_target(verbosity >= Verbosity::Verbose)
        .with_file(false)
        .with_line_number(verbosity == Verbosity::Trace);

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(layer)
        .try_init();
}

/// Logging for tests: warnings and errors through the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(Verbosity::default().level(), Level::INFO);
        assert_eq!(Verbosity::Trace.level(), Level::TRACE);
    }

    #[test]
    fn test_normal_hides_requests() {
        assert_eq!(
            Verbosity::Normal.directive(),
            "soultrip=INFO,tower_http=WARN,lettre=WARN"
        );
    }

    #[test]
    fn test_verbose_shows_requests() {
        assert_eq!(
            Verbosity::Verbose.directive(),
            "soultrip=DEBUG,tower_http=DEBUG,lettre=WARN"
        );
        assert!(Verbosity::Trace.directive().ends_with("lettre=TRACE"));
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(verbosity.directive()).is_ok());
        }
    }

    #[test]
    fn test_init_is_repeatable() {
        init_test_logging();
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Trace);
    }
}
