//! Logging setup for the ngpack CLI.
//!
//! Logs go to stderr so stdout only carries the configuration JSON.
//!
//! ```rust,no_run
//! use ngpack_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("assembling");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "ngpack_cli=debug,ngpack_bundler=debug,ngpack_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "ngpack_cli=info,ngpack_bundler=info,ngpack_config=info";

/// Initialize the tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug for the ngpack crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for the ngpack crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // Embedding applications may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether stderr output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
