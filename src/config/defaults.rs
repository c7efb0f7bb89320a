// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Progress refresh and listen notification intervals
//! - **Jump**: Keyboard/button seek steps
//! - **Volume**: Initial volume and volume step

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default refresh interval of the rendered progress position (milliseconds).
pub const DEFAULT_PROGRESS_UPDATE_INTERVAL_MS: u64 = 20;

/// Default interval between periodic listen notifications (milliseconds).
pub const DEFAULT_LISTEN_INTERVAL_MS: u64 = 1000;

/// Minimum allowed throttle interval (milliseconds).
pub const MIN_UPDATE_INTERVAL_MS: u64 = 1;

/// Maximum allowed throttle interval (milliseconds).
pub const MAX_UPDATE_INTERVAL_MS: u64 = 60_000;

// ==========================================================================
// Jump Defaults
// ==========================================================================

/// Default progress jump step for rewind/forward (milliseconds).
pub const DEFAULT_PROGRESS_JUMP_STEP_MS: u64 = 5000;

/// Minimum progress jump step (milliseconds).
pub const MIN_PROGRESS_JUMP_STEP_MS: u64 = 1;

/// Maximum progress jump step (milliseconds, ten minutes).
pub const MAX_PROGRESS_JUMP_STEP_MS: u64 = 600_000;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f64 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f64 = 1.0;

/// Default volume adjustment per key press (10%).
pub const DEFAULT_VOLUME_JUMP_STEP: f64 = 0.1;

/// Smallest accepted volume step.
pub const MIN_VOLUME_JUMP_STEP: f64 = 0.01;

/// Largest accepted volume step.
pub const MAX_VOLUME_JUMP_STEP: f64 = 1.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_UPDATE_INTERVAL_MS > 0);
    assert!(MAX_UPDATE_INTERVAL_MS > MIN_UPDATE_INTERVAL_MS);
    assert!(DEFAULT_PROGRESS_UPDATE_INTERVAL_MS >= MIN_UPDATE_INTERVAL_MS);
    assert!(DEFAULT_PROGRESS_UPDATE_INTERVAL_MS <= MAX_UPDATE_INTERVAL_MS);
    assert!(DEFAULT_LISTEN_INTERVAL_MS >= MIN_UPDATE_INTERVAL_MS);
    assert!(DEFAULT_LISTEN_INTERVAL_MS <= MAX_UPDATE_INTERVAL_MS);

    assert!(MIN_PROGRESS_JUMP_STEP_MS > 0);
    assert!(MAX_PROGRESS_JUMP_STEP_MS > MIN_PROGRESS_JUMP_STEP_MS);
    assert!(DEFAULT_PROGRESS_JUMP_STEP_MS >= MIN_PROGRESS_JUMP_STEP_MS);
    assert!(DEFAULT_PROGRESS_JUMP_STEP_MS <= MAX_PROGRESS_JUMP_STEP_MS);

    assert!(MIN_VOLUME == 0.0);
    assert!(MAX_VOLUME == 1.0);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(MIN_VOLUME_JUMP_STEP > 0.0);
    assert!(MAX_VOLUME_JUMP_STEP >= MIN_VOLUME_JUMP_STEP);
    assert!(DEFAULT_VOLUME_JUMP_STEP >= MIN_VOLUME_JUMP_STEP);
    assert!(DEFAULT_VOLUME_JUMP_STEP <= MAX_VOLUME_JUMP_STEP);
};
