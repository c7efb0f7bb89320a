// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[timing]` - Progress refresh and listen notification intervals
//! - `[controls]` - Jump steps and keyboard bindings
//! - `[media]` - Initial volume, mute, loop, fixed duration and autoplay
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `DECKHAND_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use deckhand::config::{self, PlayerConfig};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.media.loop_enabled = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::player::{JumpStep, UpdateInterval, Volume, VolumeStep};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Deckhand";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "DECKHAND_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Throttle intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Refresh interval of the rendered progress position (milliseconds).
    #[serde(
        default = "default_progress_update_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_update_interval_ms: Option<u64>,

    /// Interval between periodic listen notifications (milliseconds).
    #[serde(
        default = "default_listen_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub listen_interval_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            progress_update_interval_ms: default_progress_update_interval_ms(),
            listen_interval_ms: default_listen_interval_ms(),
        }
    }
}

/// Jump steps and keyboard bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Step used by rewind and forward (milliseconds).
    #[serde(
        default = "default_progress_jump_step_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_jump_step_ms: Option<u64>,

    /// Rewind step override (milliseconds). Zero or absent uses the shared step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backward_jump_step_ms: Option<u64>,

    /// Forward step override (milliseconds). Zero or absent uses the shared step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_jump_step_ms: Option<u64>,

    /// Volume change per arrow key press (0.0 to 1.0).
    #[serde(
        default = "default_volume_jump_step",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_jump_step: Option<f64>,

    /// Whether the built-in keyboard shortcuts are active.
    #[serde(
        default = "default_key_bindings",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_key_bindings: Option<bool>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            progress_jump_step_ms: default_progress_jump_step_ms(),
            backward_jump_step_ms: None,
            forward_jump_step_ms: None,
            volume_jump_step: default_volume_jump_step(),
            default_key_bindings: default_key_bindings(),
        }
    }
}

/// Initial media state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaConfig {
    /// Volume applied when a resource is bound (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Start muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Whether playback should loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_enabled: Option<bool>,

    /// Request playback whenever the bound resource changes source.
    #[serde(
        default = "default_autoplay_after_src_change",
        skip_serializing_if = "Option::is_none"
    )]
    pub autoplay_after_src_change: Option<bool>,

    /// Fixed duration for streamed sources whose own duration is unreliable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_duration_secs: Option<f64>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: Some(false),
            loop_enabled: Some(false),
            autoplay_after_src_change: default_autoplay_after_src_change(),
            fixed_duration_secs: None,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerConfig {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

impl PlayerConfig {
    #[must_use]
    pub fn progress_update_interval(&self) -> UpdateInterval {
        self.timing
            .progress_update_interval_ms
            .map_or_else(UpdateInterval::progress_default, UpdateInterval::from_millis)
    }

    #[must_use]
    pub fn listen_interval(&self) -> UpdateInterval {
        self.timing
            .listen_interval_ms
            .map_or_else(UpdateInterval::listen_default, UpdateInterval::from_millis)
    }

    /// Rewind step, falling back to the shared step when no override is set.
    #[must_use]
    pub fn backward_jump_step(&self) -> JumpStep {
        self.jump_step_with_override(self.controls.backward_jump_step_ms)
    }

    /// Forward step, falling back to the shared step when no override is set.
    #[must_use]
    pub fn forward_jump_step(&self) -> JumpStep {
        self.jump_step_with_override(self.controls.forward_jump_step_ms)
    }

    fn jump_step_with_override(&self, step_override: Option<u64>) -> JumpStep {
        match step_override.filter(|ms| *ms > 0) {
            Some(ms) => JumpStep::from_millis(ms),
            None => self
                .controls
                .progress_jump_step_ms
                .map_or_else(JumpStep::default, JumpStep::from_millis),
        }
    }

    #[must_use]
    pub fn volume_jump_step(&self) -> VolumeStep {
        self.controls
            .volume_jump_step
            .map_or_else(VolumeStep::default, VolumeStep::new)
    }

    #[must_use]
    pub fn default_key_bindings(&self) -> bool {
        self.controls.default_key_bindings.unwrap_or(true)
    }

    /// Volume applied on bind: zero when muted, the configured volume otherwise.
    #[must_use]
    pub fn initial_volume(&self) -> Volume {
        if self.media.muted.unwrap_or(false) {
            Volume::MUTED
        } else {
            self.configured_volume()
        }
    }

    /// The configured (unmuted) volume, used to seed the mute memory.
    #[must_use]
    pub fn configured_volume(&self) -> Volume {
        self.media.volume.map_or_else(Volume::default, Volume::new)
    }

    #[must_use]
    pub fn loop_enabled(&self) -> bool {
        self.media.loop_enabled.unwrap_or(false)
    }

    #[must_use]
    pub fn autoplay_after_src_change(&self) -> bool {
        self.media.autoplay_after_src_change.unwrap_or(true)
    }

    /// Fixed duration, ignored unless finite and positive.
    #[must_use]
    pub fn fixed_duration_secs(&self) -> Option<f64> {
        self.media
            .fixed_duration_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_progress_update_interval_ms() -> Option<u64> {
    Some(DEFAULT_PROGRESS_UPDATE_INTERVAL_MS)
}

fn default_listen_interval_ms() -> Option<u64> {
    Some(DEFAULT_LISTEN_INTERVAL_MS)
}

fn default_progress_jump_step_ms() -> Option<u64> {
    Some(DEFAULT_PROGRESS_JUMP_STEP_MS)
}

fn default_volume_jump_step() -> Option<f64> {
    Some(DEFAULT_VOLUME_JUMP_STEP)
}

fn default_key_bindings() -> Option<bool> {
    Some(true)
}

fn default_volume() -> Option<f64> {
    Some(DEFAULT_VOLUME)
}

fn default_autoplay_after_src_change() -> Option<bool> {
    Some(true)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory: explicit override, then the
/// `DECKHAND_CONFIG_DIR` environment variable, then the platform default.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (PlayerConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (PlayerConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (PlayerConfig::default(), Some(err.to_string()));
                }
            }
        }
    }
    (PlayerConfig::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<PlayerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PlayerConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &PlayerConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &PlayerConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &PlayerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
