// SPDX-License-Identifier: MPL-2.0
//! Rendered playback position.
//!
//! The tracker holds the last position computed from the media. It is fed by
//! the progress throttle and ignores ticks while the seek control is busy, so
//! the pointer-driven draft always wins over stale media time.

use crate::domain::player::{Interaction, Ratio};
use crate::media::MediaHandle;

/// Derives the normalized position from media time.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    rendered: Ratio,
    fixed_duration: Option<f64>,
}

impl PositionTracker {
    /// Creates a tracker. `fixed_duration` replaces the media duration when
    /// set, for streamed sources that cannot report their own length.
    #[must_use]
    pub fn new(fixed_duration: Option<f64>) -> Self {
        Self {
            rendered: Ratio::ZERO,
            fixed_duration,
        }
    }

    /// The duration every ratio/time conversion is based on.
    #[must_use]
    pub fn effective_duration(&self, media: &dyn MediaHandle) -> f64 {
        self.fixed_duration.unwrap_or_else(|| media.duration())
    }

    /// Position ratio the media currently reports.
    #[must_use]
    pub fn ratio_of(&self, media: &dyn MediaHandle) -> Ratio {
        Ratio::from_fraction(media.current_time(), self.effective_duration(media))
    }

    /// Media time corresponding to a track ratio. NaN when the duration is
    /// unknown.
    #[must_use]
    pub fn time_at(&self, media: &dyn MediaHandle, ratio: Ratio) -> f64 {
        ratio.of(self.effective_duration(media))
    }

    /// Recomputes the rendered position from the media.
    ///
    /// Returns true if the rendered value changed. Does nothing while the seek
    /// control is dragging or awaiting a delegated seek.
    pub fn on_tick(&mut self, media: &dyn MediaHandle, interaction: Interaction) -> bool {
        if interaction.suppresses_ticks() {
            return false;
        }
        let ratio = self.ratio_of(media);
        if ratio == self.rendered {
            return false;
        }
        self.rendered = ratio;
        true
    }

    /// Last position computed from the media.
    #[must_use]
    pub fn rendered(&self) -> Ratio {
        self.rendered
    }

    /// Holds a committed seek position until the next tick replaces it.
    pub fn set_rendered(&mut self, ratio: Ratio) -> bool {
        let changed = ratio != self.rendered;
        self.rendered = ratio;
        changed
    }

    pub fn reset(&mut self) {
        self.rendered = Ratio::ZERO;
    }
}
