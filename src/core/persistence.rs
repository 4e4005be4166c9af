//! Persistence of user preferences (the last selected theme) in the config directory.

use std::fs;
use std::io;

use crate::core::config::Theme;
use crate::core::paths;

const THEME_FILE: &str = "theme";

/// Load the last toggled theme from disk, if the file exists and is valid.
pub fn load_theme() -> Option<Theme> {
    let path = paths::config_dir()?.join(THEME_FILE);
    let content = fs::read_to_string(path).ok()?;
    match content.parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            log::warn!("Ignoring saved theme: {}", e);
            None
        }
    }
}

/// Save the theme to disk. Creates the config directory if needed.
pub fn save_theme(theme: Theme) -> io::Result<()> {
    let dir = paths::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No config directory"))?;
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(THEME_FILE), theme.as_str())
}
