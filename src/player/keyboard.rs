// SPDX-License-Identifier: MPL-2.0
//! Default keyboard shortcuts.
//!
//! | Key | Command |
//! |-----|---------|
//! | Space | Toggle play/pause (player container or seek track focused) |
//! | ←/→ | Jump backward/forward |
//! | ↑/↓ | Volume up/down |
//! | L | Toggle loop |
//! | M | Toggle mute |

use super::commands::Command;
use crate::config::PlayerConfig;
use crate::domain::player::{JumpStep, VolumeStep};
use iced_core::keyboard::{self, key::Named};

/// Element that had focus when the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The player's outer container.
    Container,
    SeekTrack,
    VolumeTrack,
    /// Any other element inside the player (e.g. a button).
    Other,
}

/// A resolved shortcut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyAction {
    pub command: Command,
    /// The host should suppress the key's default behavior (scrolling).
    pub prevent_default: bool,
}

/// Key to command mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    enabled: bool,
    backward: JumpStep,
    forward: JumpStep,
    volume_step: VolumeStep,
}

impl KeyBindings {
    #[must_use]
    pub fn new(enabled: bool, backward: JumpStep, forward: JumpStep, volume_step: VolumeStep) -> Self {
        Self {
            enabled,
            backward,
            forward,
            volume_step,
        }
    }

    #[must_use]
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(
            config.default_key_bindings(),
            config.backward_jump_step(),
            config.forward_jump_step(),
            config.volume_jump_step(),
        )
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Maps a key press to a command, or `None` if the key is not bound.
    #[must_use]
    pub fn resolve(&self, key: &keyboard::Key, focus: FocusTarget) -> Option<KeyAction> {
        if !self.enabled {
            return None;
        }
        let (command, prevent_default) = match key {
            keyboard::Key::Named(Named::Space) => {
                if !matches!(focus, FocusTarget::Container | FocusTarget::SeekTrack) {
                    return None;
                }
                (Command::TogglePlayPause, true)
            }
            keyboard::Key::Named(Named::ArrowLeft) => {
                (Command::JumpBy(self.backward.backward_delta_ms()), false)
            }
            keyboard::Key::Named(Named::ArrowRight) => {
                (Command::JumpBy(self.forward.forward_delta_ms()), false)
            }
            keyboard::Key::Named(Named::ArrowUp) => {
                (Command::JumpVolumeBy(self.volume_step.value()), true)
            }
            keyboard::Key::Named(Named::ArrowDown) => {
                (Command::JumpVolumeBy(-self.volume_step.value()), true)
            }
            keyboard::Key::Character(c) if c.as_str() == "l" => (Command::ToggleLoop, false),
            keyboard::Key::Character(c) if c.as_str() == "m" => (Command::ToggleMute, false),
            _ => return None,
        };
        Some(KeyAction {
            command,
            prevent_default,
        })
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}
