use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_DIR_ENV: &str = "HOWTO_DATA_DIR";

const APP_DIR_NAME: &str = "howto-guides";

/// Get the application data directory.
///
/// `HOWTO_DATA_DIR` wins when set; otherwise the platform data directory
/// (`~/.local/share/howto-guides` on Linux).
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
