use tracing::{debug, info};

use crate::generation::prompts::{DEFAULT_RULES_MICROSTOCK, DEFAULT_RULES_SCENE};
use crate::settings::{write_if_absent, SuffixMode, Workspace};

/// Full contents of rules.txt, or an empty string when it cannot be read.
pub fn load(workspace: &Workspace) -> String {
    let path = workspace.rules_path();
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        debug!("Rules unavailable at {} ({e})", path.display());
        String::new()
    })
}

/// Built-in rules written on first run for the given layout.
pub fn default_rules(mode: SuffixMode) -> &'static str {
    match mode {
        SuffixMode::Params => DEFAULT_RULES_MICROSTOCK,
        SuffixMode::AspectRatio => DEFAULT_RULES_SCENE,
    }
}

/// Writes the built-in rules if rules.txt does not exist. Never touches an
/// existing file, whatever its contents.
pub fn ensure_default(workspace: &Workspace, mode: SuffixMode) -> std::io::Result<()> {
    let path = workspace.rules_path();
    if write_if_absent(&path, default_rules(mode))? {
        info!("Created default rules at {}", path.display());
    }
    Ok(())
}
