//! Sets up `tracing-subscriber` for the binary. `-v`/`-vv` raise the default
//! level; `TOPMARK_LOG` always overrides it, same precedence as the
//! teacher's bootstrap logging setup.

use tracing_subscriber::EnvFilter;

/// Verbosity requested on the command line, before the environment override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Default,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            Verbosity::Default => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Trace => "debug",
        }
    }
}

/// Installs the global subscriber. Idempotent: a process (or test binary)
/// that calls this more than once keeps whichever subscriber was installed
/// first rather than panicking.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env("TOPMARK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_escalates_with_flag_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Default);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(5), Verbosity::Trace);
    }

    #[test]
    fn verbosity_orders_from_default_to_trace() {
        assert!(Verbosity::Default < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Trace);
    }
}
