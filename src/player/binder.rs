// SPDX-License-Identifier: MPL-2.0
//! Attaches the player's event handlers to a media resource.
//!
//! Handlers attached here never touch player state. They only forward the
//! event into the player's inbox, tagged with the generation of the binding
//! that attached them, so events from a swapped-out resource can be dropped
//! when the inbox is drained.

use crate::media::{EventHandler, MediaEvent, MediaEventKind, MediaHandle, SubscriptionId};
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedSender;

/// A media event as queued in the player's inbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub generation: u64,
    pub event: MediaEvent,
}

/// What the player does with an event of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Feeds the progress and listen throttles.
    TimeUpdate,
    /// Error, or disguised end of playback.
    Error,
    /// Play state changed: notify and redraw.
    PlaybackChange,
    /// Volume changed: resync, notify and redraw.
    VolumeChange,
    /// Notify only.
    Notify,
}

impl Route {
    #[must_use]
    pub fn for_kind(kind: MediaEventKind) -> Self {
        ROUTES[kind.index()]
    }
}

/// Routing table indexed by [`MediaEventKind::index`].
const ROUTES: [Route; MediaEventKind::ALL.len()] = {
    let mut routes = [Route::Notify; MediaEventKind::ALL.len()];
    routes[MediaEventKind::TimeUpdate as usize] = Route::TimeUpdate;
    routes[MediaEventKind::Error as usize] = Route::Error;
    routes[MediaEventKind::Play as usize] = Route::PlaybackChange;
    routes[MediaEventKind::Playing as usize] = Route::PlaybackChange;
    routes[MediaEventKind::Pause as usize] = Route::PlaybackChange;
    routes[MediaEventKind::Ended as usize] = Route::PlaybackChange;
    routes[MediaEventKind::VolumeChange as usize] = Route::VolumeChange;
    routes
};

struct Binding {
    media: Rc<dyn MediaHandle>,
    generation: u64,
    subscriptions: Vec<(MediaEventKind, SubscriptionId)>,
}

/// What [`LifecycleBinder::bind`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The same resource was already bound.
    Unchanged,
    /// A new resource was bound; `replaced` tells whether another one was
    /// detached first.
    Bound { replaced: bool },
}

/// Owns the subscriptions attached to the bound resource.
pub struct LifecycleBinder {
    inbox: UnboundedSender<Envelope>,
    binding: Option<Binding>,
    generation: u64,
}

impl LifecycleBinder {
    #[must_use]
    pub fn new(inbox: UnboundedSender<Envelope>) -> Self {
        Self {
            inbox,
            binding: None,
            generation: 0,
        }
    }

    /// Attaches one handler per event kind to `media`.
    ///
    /// Binding the instance that is already bound is a no-op. Binding another
    /// instance detaches the previous one first.
    pub fn bind(&mut self, media: Rc<dyn MediaHandle>) -> BindOutcome {
        if let Some(binding) = &self.binding {
            if std::ptr::addr_eq(Rc::as_ptr(&binding.media), Rc::as_ptr(&media)) {
                return BindOutcome::Unchanged;
            }
        }
        let replaced = self.unbind();

        self.generation += 1;
        let generation = self.generation;
        let subscriptions = MediaEventKind::ALL
            .iter()
            .map(|&kind| {
                let inbox = self.inbox.clone();
                let handler: EventHandler = Rc::new(move |event: MediaEvent| {
                    // Receiver gone means the player is being torn down
                    let _ = inbox.send(Envelope { generation, event });
                });
                (kind, media.subscribe(kind, handler))
            })
            .collect();

        tracing::debug!(generation, "media bound");
        self.binding = Some(Binding {
            media,
            generation,
            subscriptions,
        });
        BindOutcome::Bound { replaced }
    }

    /// Detaches every handler this binder attached. Returns true if a resource
    /// was bound.
    pub fn unbind(&mut self) -> bool {
        let Some(binding) = self.binding.take() else {
            return false;
        };
        for (kind, id) in binding.subscriptions {
            binding.media.unsubscribe(kind, id);
        }
        tracing::debug!(generation = binding.generation, "media unbound");
        true
    }

    #[must_use]
    pub fn media(&self) -> Option<&Rc<dyn MediaHandle>> {
        self.binding.as_ref().map(|binding| &binding.media)
    }

    /// Returns true if `envelope` was produced by the current binding.
    #[must_use]
    pub fn is_current(&self, envelope: &Envelope) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.generation == envelope.generation)
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.binding
            .as_ref()
            .map_or(0, |binding| binding.subscriptions.len())
    }
}

impl Drop for LifecycleBinder {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl std::fmt::Debug for LifecycleBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleBinder")
            .field(
                "generation",
                &self.binding.as_ref().map(|binding| binding.generation),
            )
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}
