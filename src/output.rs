//! Process-wide output switches.
//!
//! The shell transcript and chat replies go to stdout. Banners, operator
//! notices and logs go to stderr, where `--quiet` can silence everything but
//! warnings.

use std::ffi::OsString;
use std::sync::OnceLock;

static SETTINGS: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    /// Builds the settings from the global CLI flags, honouring `NO_COLOR`.
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color: no_color || env_disables_color(std::env::var_os("NO_COLOR")),
        }
    }
}

/// <https://no-color.org/>: any non-empty value turns color off.
fn env_disables_color(value: Option<OsString>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Installs the settings; only the first call wins.
pub fn init(config: OutputConfig) {
    let _ = SETTINGS.set(config);
}

fn settings() -> OutputConfig {
    *SETTINGS.get_or_init(|| OutputConfig::from_flags(false, false))
}

pub fn is_quiet() -> bool {
    settings().quiet
}

pub fn is_no_color() -> bool {
    settings().no_color
}

/// Prints to stderr unless `--quiet` is set.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints to stderr, even in quiet mode.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
    }};
}
