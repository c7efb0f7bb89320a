// SPDX-License-Identifier: MPL-2.0
//! `deckhand` is the interaction engine behind an embeddable audio player.
//!
//! It binds to one externally owned media resource and keeps the rendered
//! playback position and volume in sync with three independently timed
//! sources: the resource's own event stream, pointer and keyboard gestures,
//! and asynchronous seek completion for streamed sources.
//!
//! The layout of buttons, icons and labels is left to the host UI. This crate
//! provides the state machines, the command surface and the notifications.

#![doc(html_root_url = "https://docs.rs/deckhand/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod player;

#[cfg(test)]
mod test_utils;

pub use domain::player::{Interaction, Ratio, SeekTicket, Volume};
pub use error::{Error, PlaybackError, Result};
pub use media::{MediaEvent, MediaEventKind, MediaHandle, ReadyState};
pub use player::{AudioPlayer, Effect, Message};
