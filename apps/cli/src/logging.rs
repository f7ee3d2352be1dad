//! Tracing setup for the `costwise` binary.
//!
//! Logs always go to stderr so `--json` output on stdout stays parseable.
//!
//! ## Filter selection
//! - `RUST_LOG` when set
//! - otherwise `log_filter` from the config (or `COSTWISE_LOG`)
//! - otherwise [`DEFAULT_FILTER`]
//!
//! `--verbose` appends `costwise=debug` to whichever filter won.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn,costwise=info,sqlx=warn";

fn filter_directives(configured: Option<&str>, verbose: bool) -> String {
    let base = configured.unwrap_or(DEFAULT_FILTER);
    if verbose {
        format!("{},costwise=debug", base)
    } else {
        base.to_string()
    }
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init_tracing(configured: Option<&str>, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(configured, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
