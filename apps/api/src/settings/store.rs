use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::settings::{Settings, Workspace};

/// Loads settings.toml. A missing, unreadable or malformed file yields the
/// built-in defaults; keys absent from the file take their own defaults.
pub fn load(workspace: &Workspace) -> Settings {
    let path = workspace.settings_path();

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No settings at {} ({e}), using defaults", path.display());
            return Settings::default();
        }
    };

    toml::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed settings file {}: {e}", path.display());
        Settings::default()
    })
}

/// Overwrites settings.toml with `settings`, exactly as given.
pub fn save(workspace: &Workspace, settings: &Settings) -> Result<()> {
    let path = workspace.settings_path();
    let body = toml::to_string(settings).context("Failed to serialize settings")?;

    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    debug!("Settings saved to {}", path.display());
    Ok(())
}
