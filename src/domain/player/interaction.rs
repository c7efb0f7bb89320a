// SPDX-License-Identifier: MPL-2.0
//! Pointer interaction state machine for track controls.
//!
//! A control is either idle (position follows the media), being dragged
//! (position follows the pointer) or waiting on a delegated seek (position
//! frozen on the released draft). The draft only exists inside the active
//! states, so "dragging and awaiting at once" cannot be represented.

use super::newtypes::Ratio;

/// Identifies one delegated seek request.
///
/// Tickets are handed out in increasing order; a settlement carrying a ticket
/// other than the one currently awaited is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SeekTicket(u64);

impl SeekTicket {
    /// Returns the ticket following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Interaction state of one track control.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,

    /// Pointer is held down on the track.
    Dragging { draft: Ratio },

    /// Pointer was released and a delegated seek is outstanding.
    AwaitingSeek { draft: Ratio, ticket: SeekTicket },
}

impl Interaction {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_awaiting_seek(self) -> bool {
        matches!(self, Self::AwaitingSeek { .. })
    }

    /// Returns true while passive position updates must be ignored.
    #[must_use]
    pub fn suppresses_ticks(self) -> bool {
        !self.is_idle()
    }

    /// Returns the pointer-driven position, if any.
    #[must_use]
    pub fn draft(self) -> Option<Ratio> {
        match self {
            Self::Idle => None,
            Self::Dragging { draft } | Self::AwaitingSeek { draft, .. } => Some(draft),
        }
    }

    /// Returns the outstanding seek ticket, if any.
    #[must_use]
    pub fn ticket(self) -> Option<SeekTicket> {
        match self {
            Self::AwaitingSeek { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}
