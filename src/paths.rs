//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "termfolio";

/// Returns the configuration directory for termfolio.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/termfolio` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/termfolio` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_xdg<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        // SAFETY: env-mutating tests are serialized
        match value {
            Some(v) => unsafe { std::env::set_var("XDG_CONFIG_HOME", v) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        f();

        // Restore
        match original {
            Some(val) => unsafe { std::env::set_var("XDG_CONFIG_HOME", val) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        with_xdg(None, || {
            let dir = config_dir().unwrap();
            assert!(dir.ends_with(".config/termfolio"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        with_xdg(Some("/custom/config"), || {
            let dir = config_dir().unwrap();
            assert_eq!(dir, PathBuf::from("/custom/config/termfolio"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_empty_xdg_is_ignored() {
        with_xdg(Some(""), || {
            let dir = config_dir().unwrap();
            assert!(dir.ends_with(".config/termfolio"));
        });
    }
}
