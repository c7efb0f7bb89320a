// SPDX-License-Identifier: MPL-2.0
//! Playback commands shared by buttons, keyboard shortcuts and the host.
//!
//! All commands are synchronous except starting playback, whose outcome is a
//! [`PlayRequest`] the caller has to drive.

use super::position::PositionTracker;
use super::volume::VolumeMemory;
use crate::domain::player::Volume;
use crate::error::PlaybackError;
use crate::media::{MediaHandle, PlayRequest};
use std::fmt;

/// A user-level playback command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlayPause,
    /// Relative jump in milliseconds (negative rewinds).
    JumpBy(i64),
    /// Relative volume change.
    JumpVolumeBy(f64),
    ToggleLoop,
    ToggleMute,
}

/// What [`toggle_play_pause`] did.
pub enum PlayToggle {
    /// Playback was requested; the request is pending.
    Requested(PlayRequest),
    Paused,
    /// Paused without a source: nothing to do.
    Unchanged,
}

impl fmt::Debug for PlayToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested(_) => f.write_str("Requested(..)"),
            Self::Paused => f.write_str("Paused"),
            Self::Unchanged => f.write_str("Unchanged"),
        }
    }
}

/// What [`jump_by`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jump {
    Moved { from: f64, to: f64 },
    /// Time or duration stayed unknown after reloading.
    Skipped,
}

/// Requests playback, reloading a resource that reports an error first.
pub fn request_play(media: &dyn MediaHandle) -> Result<PlayRequest, PlaybackError> {
    if media.error().is_some() {
        media.load().map_err(PlaybackError::PlayRequestRejected)?;
    }
    Ok(media.play())
}

/// Starts playback when paused or ended, pauses otherwise.
pub fn toggle_play_pause(media: &dyn MediaHandle) -> Result<PlayToggle, PlaybackError> {
    if media.is_paused() || media.is_ended() {
        if !media.has_source() {
            return Ok(PlayToggle::Unchanged);
        }
        return request_play(media).map(PlayToggle::Requested);
    }
    media.pause();
    Ok(PlayToggle::Paused)
}

/// Moves the position by `delta_ms`, clamped to `[0, duration]`.
///
/// Media that is not seekable yet, or whose time or duration is unknown, is
/// reloaded first. A failed reload aborts the jump.
pub fn jump_by(
    media: &dyn MediaHandle,
    tracker: &PositionTracker,
    delta_ms: i64,
) -> Result<Jump, PlaybackError> {
    let needs_reload = !media.ready_state().is_seekable()
        || !tracker.effective_duration(media).is_finite()
        || !media.current_time().is_finite();
    if needs_reload {
        media.load().map_err(PlaybackError::Reinitialization)?;
    }

    let duration = tracker.effective_duration(media);
    let current = media.current_time();
    if !duration.is_finite() || !current.is_finite() {
        return Ok(Jump::Skipped);
    }

    let target = (current + delta_ms as f64 / 1000.0).clamp(0.0, duration.max(0.0));
    media.set_current_time(target);
    Ok(Jump::Moved {
        from: current,
        to: target,
    })
}

/// Changes the volume by `delta`, clamped to `[0, 1]`.
pub fn jump_volume_by(media: &dyn MediaHandle, memory: &mut VolumeMemory, delta: f64) -> Volume {
    let volume = Volume::new(media.volume()).offset_by(delta);
    media.set_volume(volume.value());
    memory.remember(volume);
    volume
}

/// Flips the loop flag and returns the new value.
pub fn toggle_loop(media: &dyn MediaHandle) -> bool {
    let enabled = !media.is_looping();
    media.set_loop(enabled);
    enabled
}

/// Mutes an audible resource, or restores the last audible volume.
pub fn toggle_mute(media: &dyn MediaHandle, memory: &mut VolumeMemory) -> Volume {
    let current = Volume::new(media.volume());
    let next = if current.is_muted() {
        memory.last_audible()
    } else {
        memory.remember(current);
        Volume::MUTED
    };
    media.set_volume(next.value());
    next
}
