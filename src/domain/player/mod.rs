// SPDX-License-Identifier: MPL-2.0
//! Playback control domain types.
//!
//! This module contains the value objects shared by the seek and volume
//! controls, independent of any media resource or presentation concerns.

pub mod interaction;
pub mod newtypes;

// Re-export commonly used types
pub use interaction::{Interaction, SeekTicket};
pub use newtypes::{JumpStep, Ratio, UpdateInterval, Volume, VolumeStep};
