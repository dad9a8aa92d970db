//! Platform-specific paths for presets and configuration.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/mixdown/presets/` (Linux), `~/Library/Application Support/mixdown/presets/` (macOS), `%APPDATA%\mixdown\presets\` (Windows)
//! - **User config**: `~/.config/mixdown/` (Linux), `~/Library/Application Support/mixdown/` (macOS), `%APPDATA%\mixdown\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use mixdown_config::paths;
//!
//! for path in paths::list_presets_in_dir(&paths::user_presets_dir()) {
//!     println!("{:?}", paths::preset_name_from_path(&path));
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application name used for directory paths.
pub const APP_NAME: &str = "mixdown";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    ensure_presets_dir(&user_presets_dir())
}

/// Ensure `dir` exists, creating it and its parents if needed.
pub fn ensure_presets_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }
    Ok(dir.to_path_buf())
}

/// List `.toml` files in `dir`, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path.
///
/// ```rust
/// use mixdown_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/broadcast.toml"));
/// assert_eq!(name, Some("broadcast".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
