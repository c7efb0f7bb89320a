// SPDX-License-Identifier: MPL-2.0
//! Host notifications.
//!
//! Every callback is optional. Lifecycle callbacks are keyed by
//! [`MediaEventKind`]; failures go to the reporting callback matching their
//! kind and are always logged.

use crate::error::PlaybackError;
use crate::media::{MediaEvent, MediaEventKind};

type EventCallback = Box<dyn FnMut(&MediaEvent)>;
type ErrorCallback = Box<dyn FnMut(&PlaybackError)>;

/// Optional host callbacks, assembled with the builder methods.
#[derive(Default)]
pub struct Callbacks {
    events: [Option<EventCallback>; MediaEventKind::ALL.len()],
    listen: Option<Box<dyn FnMut(f64)>>,
    play_error: Option<ErrorCallback>,
    change_current_time_error: Option<ErrorCallback>,
    seek_error: Option<ErrorCallback>,
}

impl Callbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the callback for one lifecycle event kind, replacing any
    /// previous one.
    #[must_use]
    pub fn on(mut self, kind: MediaEventKind, callback: impl FnMut(&MediaEvent) + 'static) -> Self {
        self.events[kind.index()] = Some(Box::new(callback));
        self
    }

    /// Periodic notification while time advances. Receives the current time
    /// in seconds.
    #[must_use]
    pub fn on_listen(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.listen = Some(Box::new(callback));
        self
    }

    /// A play request was rejected.
    #[must_use]
    pub fn on_play_error(mut self, callback: impl FnMut(&PlaybackError) + 'static) -> Self {
        self.play_error = Some(Box::new(callback));
        self
    }

    /// A jump or local seek could not reinitialize the media.
    #[must_use]
    pub fn on_change_current_time_error(
        mut self,
        callback: impl FnMut(&PlaybackError) + 'static,
    ) -> Self {
        self.change_current_time_error = Some(Box::new(callback));
        self
    }

    /// A delegated seek failed.
    #[must_use]
    pub fn on_seek_error(mut self, callback: impl FnMut(&PlaybackError) + 'static) -> Self {
        self.seek_error = Some(Box::new(callback));
        self
    }

    pub(crate) fn emit(&mut self, event: &MediaEvent) {
        if let Some(callback) = &mut self.events[event.kind.index()] {
            callback(event);
        }
    }

    pub(crate) fn listen(&mut self, current_time: f64) {
        if let Some(callback) = &mut self.listen {
            callback(current_time);
        }
    }

    pub(crate) fn report(&mut self, error: &PlaybackError) {
        tracing::warn!(kind = error.kind(), %error, "playback failure");
        let callback = match error {
            PlaybackError::PlayRequestRejected(_) => &mut self.play_error,
            PlaybackError::Reinitialization(_) => &mut self.change_current_time_error,
            PlaybackError::DelegatedSeek { .. } => &mut self.seek_error,
            // Delivered through the error event callback
            PlaybackError::Media(_) => return,
        };
        if let Some(callback) = callback {
            callback(error);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: Vec<_> = MediaEventKind::ALL
            .iter()
            .filter(|kind| self.events[kind.index()].is_some())
            .map(|kind| kind.name())
            .collect();
        f.debug_struct("Callbacks")
            .field("events", &events)
            .field("listen", &self.listen.is_some())
            .field("play_error", &self.play_error.is_some())
            .field(
                "change_current_time_error",
                &self.change_current_time_error.is_some(),
            )
            .field("seek_error", &self.seek_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_only_matching_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut callbacks =
            Callbacks::new().on(MediaEventKind::Play, move |e| sink.borrow_mut().push(e.kind));

        callbacks.emit(&MediaEvent::new(MediaEventKind::Play));
        callbacks.emit(&MediaEvent::new(MediaEventKind::Pause));

        assert_eq!(*seen.borrow(), vec![MediaEventKind::Play]);
    }

    #[test]
    fn errors_are_routed_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (Rc::clone(&seen), Rc::clone(&seen), Rc::clone(&seen));
        let mut callbacks = Callbacks::new()
            .on_play_error(move |e| a.borrow_mut().push(("play", e.clone())))
            .on_change_current_time_error(move |e| b.borrow_mut().push(("time", e.clone())))
            .on_seek_error(move |e| c.borrow_mut().push(("seek", e.clone())));

        callbacks.report(&PlaybackError::PlayRequestRejected("denied".into()));
        callbacks.report(&PlaybackError::Reinitialization("gone".into()));
        callbacks.report(&PlaybackError::DelegatedSeek {
            target_secs: 1.0,
            message: "416".into(),
        });
        callbacks.report(&PlaybackError::Media("decode".into()));

        let tags: Vec<_> = seen.borrow().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, vec!["play", "time", "seek"]);
    }

    #[test]
    fn missing_callbacks_are_silent() {
        let mut callbacks = Callbacks::new();
        callbacks.emit(&MediaEvent::new(MediaEventKind::Ended));
        callbacks.listen(3.0);
        callbacks.report(&PlaybackError::Reinitialization("gone".into()));
    }

    #[test]
    fn listen_receives_time() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut callbacks = Callbacks::new().on_listen(move |t| *sink.borrow_mut() = Some(t));

        callbacks.listen(12.5);

        assert_eq!(*seen.borrow(), Some(12.5));
    }

    #[test]
    fn debug_lists_registered_kinds() {
        let callbacks = Callbacks::new().on(MediaEventKind::Seeked, |_| {});
        let text = format!("{callbacks:?}");
        assert!(text.contains("seeked"));
        assert!(!text.contains("timeupdate"));
    }
}
