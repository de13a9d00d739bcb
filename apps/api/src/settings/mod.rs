//! Settings, rules and parameter-list persistence.
//!
//! All three files live in one data directory wrapped by [`Workspace`], which is
//! passed explicitly into every store call. Reads never fail: a missing or
//! unreadable file falls back to defaults.

pub mod handlers;
pub mod params;
pub mod rules;
pub mod store;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const SETTINGS_FILE: &str = "settings.toml";
pub const RULES_FILE: &str = "rules.txt";
pub const PARAMS_FILE: &str = "params.txt";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 5.0;
pub const MAX_TEMPERATURE: f64 = 10.0;
pub const MIN_PROMPTS: u32 = 1;
pub const MAX_PROMPTS: u32 = 100;

/// Aspect-ratio presets offered in the aspect-ratio layout.
pub const AR_PRESETS: &[&str] = &["--ar 3:2", "--ar 16:9", "--ar 7:3", "--ar 1:1"];
pub const DEFAULT_AR_PRESET: &str = "--ar 16:9";

/// Which suffix selector the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixMode {
    /// One suffix picked from params.txt (`selected_param`).
    Params,
    /// Preset or custom aspect ratio (`ar_mode`, `ar_preset`, `ar_custom`).
    AspectRatio,
}

impl FromStr for SuffixMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "params" | "param" => Ok(SuffixMode::Params),
            "aspect_ratio" | "ar" => Ok(SuffixMode::AspectRatio),
            other => Err(format!(
                "unknown suffix mode '{other}' (expected 'params' or 'aspect_ratio')"
            )),
        }
    }
}

impl fmt::Display for SuffixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixMode::Params => write!(f, "params"),
            SuffixMode::AspectRatio => write!(f, "aspect_ratio"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArMode {
    #[default]
    Preset,
    Custom,
}

/// The persisted form state.
///
/// Both layouts' suffix keys are carried; only the ones matching the running
/// [`SuffixMode`] are consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub initial_keywords: String,
    /// Slider scale, 0–10. Stored as a float; integers in the file are coerced.
    pub temperature: f64,
    pub num_prompts: u32,
    pub model: String,
    pub selected_param: String,
    pub ar_mode: ArMode,
    pub ar_preset: String,
    pub ar_custom: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            initial_keywords: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            num_prompts: MIN_PROMPTS,
            model: DEFAULT_MODEL.to_string(),
            selected_param: String::new(),
            ar_mode: ArMode::Preset,
            ar_preset: DEFAULT_AR_PRESET.to_string(),
            ar_custom: String::new(),
        }
    }
}

impl Settings {
    /// Integer slider position for the UI. Truncates, then clamps to 0–10.
    pub fn temperature_slider(&self) -> u8 {
        if self.temperature.is_nan() {
            return DEFAULT_TEMPERATURE as u8;
        }
        self.temperature.trunc().clamp(0.0, MAX_TEMPERATURE) as u8
    }

    /// The aspect ratio that is active under `ar_mode`.
    /// Unknown presets fall back to [`DEFAULT_AR_PRESET`].
    pub fn active_aspect_ratio(&self) -> &str {
        match self.ar_mode {
            ArMode::Preset => {
                let preset = self.ar_preset.trim();
                if AR_PRESETS.contains(&preset) {
                    preset
                } else {
                    DEFAULT_AR_PRESET
                }
            }
            ArMode::Custom => self.ar_custom.trim(),
        }
    }

    /// Parameter the selector should show: the saved one when it is still
    /// offered, otherwise the first option.
    pub fn displayed_param<'a>(&'a self, options: &'a [String]) -> &'a str {
        options
            .iter()
            .find(|o| **o == self.selected_param)
            .or_else(|| options.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Resolves the suffix appended to every generated prompt.
    pub fn resolve_suffix(&self, mode: SuffixMode, options: &[String]) -> Result<String, AppError> {
        match mode {
            SuffixMode::AspectRatio => Ok(self.active_aspect_ratio().to_string()),
            SuffixMode::Params => {
                let selected = self.selected_param.trim();
                if selected.is_empty() || options.iter().any(|o| o == selected) {
                    Ok(selected.to_string())
                } else {
                    Err(AppError::Validation(format!(
                        "selected_param '{selected}' is not listed in {PARAMS_FILE}"
                    )))
                }
            }
        }
    }
}

/// Data directory context shared by the settings, rules and parameter stores.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the data directory if it does not exist yet.
    pub fn prepare(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.root.join(RULES_FILE)
    }

    pub fn params_path(&self) -> PathBuf {
        self.root.join(PARAMS_FILE)
    }
}

/// Creates `path` with `contents` unless it already exists.
/// Returns whether the file was written.
fn write_if_absent(path: &Path, contents: &str) -> std::io::Result<bool> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => {
            write_or_discard(file, path, contents)?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}

/// Fills a freshly created file; on failure the partial file is removed so a
/// later `ensure_default` can write it again.
fn write_or_discard(
    mut writer: impl std::io::Write,
    path: &Path,
    contents: &str,
) -> std::io::Result<()> {
    if let Err(e) = writer
        .write_all(contents.as_bytes())
        .and_then(|()| writer.flush())
    {
        drop(writer);
        if let Err(remove_err) = std::fs::remove_file(path) {
            tracing::warn!("Failed to remove partial file {}: {remove_err}", path.display());
        }
        return Err(e);
    }
    Ok(())
}
