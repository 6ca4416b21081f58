//! Diagnostics for the action step.
//!
//! Output goes to stderr. Stdout carries workflow commands (`::error::`)
//! that the runner parses, so nothing else may be printed there.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the level is `info`, with this
/// crate raised to `debug` when `verbose` is set.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

// Verbose only adds output; dependencies stay at `info`.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,gpt_translate=debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_quiet() {
        assert_eq!(default_directives(false), "info");
    }

    #[test]
    fn test_default_directives_verbose_keeps_info_for_others() {
        let directives = default_directives(true);
        assert!(directives.split(',').any(|d| d == "info"));
        assert!(directives.split(',').any(|d| d == "gpt_translate=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
