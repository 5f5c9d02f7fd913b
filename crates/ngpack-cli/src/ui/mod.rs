//! Status messages on stderr.
//!
//! ```no_run
//! use ngpack_cli::ui;
//!
//! ui::init(false, false);
//! ui::success("Configuration written to dist/bundler.json");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide once whether status messages are colored, and whether they are
/// printed at all. `--quiet` silences them like it silences logging.
pub fn init(no_color: bool, quiet: bool) {
    COLORS.store(!no_color && crate::logger::should_use_colors(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn no_color_flag_disables_colors() {
        init(true, false);
        assert!(!colors_enabled());
        assert!(!is_quiet());
    }

    #[test]
    #[serial]
    fn quiet_flag_is_remembered() {
        init(true, true);
        assert!(is_quiet());
        init(true, false);
    }
}
