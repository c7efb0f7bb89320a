// SPDX-License-Identifier: MPL-2.0
//! The [`MediaHandle`] trait.

use super::events::{MediaEvent, MediaEventKind, ReadyState};
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;

/// Pending outcome of a play request. Rejections carry the resource's reason.
pub type PlayRequest = LocalBoxFuture<'static, Result<(), String>>;

/// Callback attached to one lifecycle event kind.
pub type EventHandler = Rc<dyn Fn(MediaEvent)>;

/// Identifies one attached handler so it can be detached later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A controllable, externally owned audio resource.
///
/// All methods take `&self`: the resource has its own interior state and is
/// shared between the host and the player. Implementations must not invoke
/// subscribed handlers synchronously from within `subscribe`/`unsubscribe`.
pub trait MediaHandle {
    /// Requests playback. The returned future resolves once the resource has
    /// accepted or rejected the request.
    fn play(&self) -> PlayRequest;

    fn pause(&self);

    /// Reinitializes the resource from its current source.
    fn load(&self) -> Result<(), String>;

    /// Current position in seconds. May be NaN before metadata is known.
    fn current_time(&self) -> f64;

    fn set_current_time(&self, secs: f64);

    /// Duration in seconds. NaN when unknown, infinite for live streams.
    fn duration(&self) -> f64;

    fn volume(&self) -> f64;

    fn set_volume(&self, volume: f64);

    fn is_looping(&self) -> bool;

    fn set_loop(&self, enabled: bool);

    fn is_paused(&self) -> bool;

    fn is_ended(&self) -> bool;

    fn ready_state(&self) -> ReadyState;

    /// Native error of the last operation, if any.
    fn error(&self) -> Option<String>;

    /// Returns true if a source is assigned.
    fn has_source(&self) -> bool;

    fn subscribe(&self, kind: MediaEventKind, handler: EventHandler) -> SubscriptionId;

    fn unsubscribe(&self, kind: MediaEventKind, id: SubscriptionId);
}
