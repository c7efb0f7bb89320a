// SPDX-License-Identifier: MPL-2.0
//! Playback control newtypes.
//!
//! This module provides type-safe wrappers for control values,
//! ensuring they are always within valid ranges.

use crate::config::defaults;
use std::time::Duration;

// =============================================================================
// Ratio
// =============================================================================

/// Normalized track position, guaranteed to be within 0.0–1.0.
///
/// NaN collapses to 0.0 so a rendered position is always paintable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Ratio(f64);

impl Ratio {
    /// Start of the track.
    pub const ZERO: Self = Self(0.0);
    /// End of the track.
    pub const ONE: Self = Self(1.0);

    /// Creates a new ratio, clamping to valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Divides `numerator` by `denominator`.
    ///
    /// Zero, NaN or infinite denominators yield [`Ratio::ZERO`].
    #[must_use]
    pub fn from_fraction(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 || !denominator.is_finite() {
            return Self::ZERO;
        }
        Self::new(numerator / denominator)
    }

    /// Returns the ratio value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Scales `total` by this ratio.
    #[must_use]
    pub fn of(self, total: f64) -> f64 {
        self.0 * total
    }
}

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    use crate::config::defaults;

    /// Minimum volume level.
    pub const MIN: f64 = defaults::MIN_VOLUME;
    /// Maximum volume level.
    pub const MAX: f64 = defaults::MAX_VOLUME;
    /// Default volume level.
    pub const DEFAULT: f64 = defaults::DEFAULT_VOLUME;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// This newtype enforces validity at the type level, making it impossible
/// to create an invalid volume value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Silence.
    pub const MUTED: Self = Self(volume_bounds::MIN);

    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f64) -> Self {
        if volume.is_nan() {
            Self::MUTED
        } else {
            Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
        }
    }

    /// Returns the volume value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if the volume is exactly zero.
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 <= volume_bounds::MIN
    }

    /// Adds a signed offset, clamping to the valid range.
    #[must_use]
    pub fn offset_by(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

impl From<Ratio> for Volume {
    fn from(ratio: Ratio) -> Self {
        Self::new(ratio.value())
    }
}

// =============================================================================
// VolumeStep
// =============================================================================

/// Volume step bounds.
pub mod volume_step_bounds {
    use crate::config::defaults;

    /// Smallest step.
    pub const MIN: f64 = defaults::MIN_VOLUME_JUMP_STEP;
    /// Largest step (full range).
    pub const MAX: f64 = defaults::MAX_VOLUME_JUMP_STEP;
    /// Default step (10%).
    pub const DEFAULT: f64 = defaults::DEFAULT_VOLUME_JUMP_STEP;
}

/// Volume change applied by one keyboard press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeStep(f64);

impl VolumeStep {
    /// Creates a new step, clamping to valid range.
    #[must_use]
    pub fn new(step: f64) -> Self {
        if step.is_nan() {
            Self::default()
        } else {
            Self(step.clamp(volume_step_bounds::MIN, volume_step_bounds::MAX))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for VolumeStep {
    fn default() -> Self {
        Self(volume_step_bounds::DEFAULT)
    }
}

// =============================================================================
// JumpStep
// =============================================================================

/// Progress jump bounds in milliseconds.
pub mod jump_step_bounds {
    use crate::config::defaults;

    /// Minimum step (1 ms).
    pub const MIN_MS: u64 = defaults::MIN_PROGRESS_JUMP_STEP_MS;
    /// Maximum step (10 minutes).
    pub const MAX_MS: u64 = defaults::MAX_PROGRESS_JUMP_STEP_MS;
    /// Default step (5 seconds).
    pub const DEFAULT_MS: u64 = defaults::DEFAULT_PROGRESS_JUMP_STEP_MS;
}

/// Rewind/forward step, guaranteed to be within valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpStep(u64);

impl JumpStep {
    /// Creates a new step from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(jump_step_bounds::MIN_MS, jump_step_bounds::MAX_MS))
    }

    /// Returns the step in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Signed offset for a backward jump.
    #[must_use]
    pub fn backward_delta_ms(self) -> i64 {
        -self.forward_delta_ms()
    }

    /// Signed offset for a forward jump.
    #[must_use]
    pub fn forward_delta_ms(self) -> i64 {
        // MAX_MS fits comfortably in i64
        self.0 as i64
    }
}

impl Default for JumpStep {
    fn default() -> Self {
        Self(jump_step_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// UpdateInterval
// =============================================================================

/// Throttle interval bounds in milliseconds.
pub mod interval_bounds {
    use crate::config::defaults;

    /// Minimum interval.
    pub const MIN_MS: u64 = defaults::MIN_UPDATE_INTERVAL_MS;
    /// Maximum interval.
    pub const MAX_MS: u64 = defaults::MAX_UPDATE_INTERVAL_MS;
}

/// Minimum spacing between two throttled deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateInterval(Duration);

impl UpdateInterval {
    /// Creates a new interval from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(
            ms.clamp(interval_bounds::MIN_MS, interval_bounds::MAX_MS),
        ))
    }

    /// Default refresh interval of the rendered position.
    #[must_use]
    pub fn progress_default() -> Self {
        Self::from_millis(defaults::DEFAULT_PROGRESS_UPDATE_INTERVAL_MS)
    }

    /// Default interval of the periodic listen notification.
    #[must_use]
    pub fn listen_default() -> Self {
        Self::from_millis(defaults::DEFAULT_LISTEN_INTERVAL_MS)
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self::progress_default()
    }
}
