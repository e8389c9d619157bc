//! Platform paths for configuration and trace output.
//!
//! Locations follow the platform conventions exposed by the `dirs` crate
//! (`~/.config` and `~/.local/share` on Linux, `~/Library/Application Support`
//! on macOS, `%APPDATA%` on Windows). When the platform directory cannot be
//! determined, the current directory is used.

use std::path::PathBuf;

const APP_DIR: &str = "boostfocus";

/// Returns the data directory for trace files.
///
/// # Examples
///
/// ```
/// use boostfocus::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("boostfocus"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the default configuration file path (`<config_dir>/boostfocus/config.toml`).
#[must_use]
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use boostfocus::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/notes"), home.join("notes"));
///     assert_eq!(expand_tilde("~"), home);
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
