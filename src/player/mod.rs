// SPDX-License-Identifier: MPL-2.0
//! Audio player engine.
//!
//! [`AudioPlayer`] composes the seek and volume controls, the playback
//! commands, the lifecycle binder and the throttles behind an iced-style
//! update surface:
//!
//! - pointer and command input goes through [`AudioPlayer::handle`],
//! - keys go through [`AudioPlayer::handle_key`],
//! - media events are drained with [`AudioPlayer::dispatch_media_events`],
//! - throttled deliveries are fired with [`AudioPlayer::fire_due_timers`] or
//!   awaited with [`AudioPlayer::wait_for_timers`].
//!
//! Every entry point returns an [`Effect`]. A [`PlayerTask`] must be driven
//! by the host and the [`Message`] it yields fed back into `handle`.
//!
//! # Example
//!
//! ```ignore
//! let mut player = AudioPlayer::new(&config, scope).with_callbacks(callbacks);
//! player.bind(media);
//! loop {
//!     tokio::select! {
//!         effect = player.wait_for_timers() => host.apply(effect),
//!         input = host.next_input() => host.apply(player.handle(input)),
//!     }
//!     host.apply(player.dispatch_media_events());
//! }
//! ```

pub mod binder;
pub mod commands;
pub mod drag;
pub mod keyboard;
pub mod notify;
pub mod position;
pub mod seek;
pub mod throttle;
pub mod volume;

pub use binder::{BindOutcome, Envelope, LifecycleBinder, Route};
pub use commands::Command;
pub use drag::{CaptureId, Control, PointerCapture, PointerScope};
pub use keyboard::{FocusTarget, KeyAction, KeyBindings};
pub use notify::Callbacks;
pub use position::PositionTracker;
pub use seek::{SeekCoordinator, SeekDelegate, SeekRequest, SeekStrategy};
pub use throttle::Throttle;
pub use volume::{VolumeController, VolumeMemory};

use crate::config::PlayerConfig;
use crate::domain::player::{Interaction, Ratio, SeekTicket, Volume};
use crate::error::PlaybackError;
use crate::media::{MediaEvent, MediaEventKind, MediaHandle, PlayRequest};
use commands::{Jump, PlayToggle};
use futures_util::future::{FutureExt, LocalBoxFuture};
use iced_core::{keyboard as iced_keyboard, Point, Rectangle};
use seek::ReleaseOutcome;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Instant;

/// Input accepted by [`AudioPlayer::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Pointer pressed on the seek track.
    SeekPressed {
        point: Point,
        bounds: Option<Rectangle>,
    },
    /// Captured pointer moved while the seek track is held.
    SeekMoved {
        point: Point,
        bounds: Option<Rectangle>,
    },
    /// Captured pointer released.
    SeekReleased,
    VolumePressed {
        point: Point,
        bounds: Option<Rectangle>,
    },
    VolumeMoved {
        point: Point,
        bounds: Option<Rectangle>,
    },
    VolumeReleased,
    /// A playback command from a button or the host.
    Command(Command),
    /// A delegated seek finished.
    SeekSettled {
        ticket: SeekTicket,
        target_secs: f64,
        result: Result<(), String>,
    },
    /// A play request finished.
    PlaySettled { result: Result<(), String> },
}

/// Asynchronous work handed to the host. Resolves to the message to feed back.
pub struct PlayerTask(LocalBoxFuture<'static, Message>);

impl PlayerTask {
    fn new(future: impl Future<Output = Message> + 'static) -> Self {
        Self(future.boxed_local())
    }

    fn play(request: PlayRequest) -> Self {
        Self::new(async move {
            Message::PlaySettled {
                result: request.await,
            }
        })
    }
}

impl Future for PlayerTask {
    type Output = Message;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Message> {
        self.0.poll_unpin(cx)
    }
}

impl fmt::Debug for PlayerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlayerTask(..)")
    }
}

/// What the host has to do after an update.
#[derive(Debug, Default)]
pub enum Effect {
    #[default]
    None,
    /// Rendered state changed.
    Redraw,
    /// Rendered state changed and a task must be driven.
    Task(PlayerTask),
}

impl Effect {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        !self.is_none()
    }

    /// Returns the task, if any.
    #[must_use]
    pub fn into_task(self) -> Option<PlayerTask> {
        match self {
            Self::Task(task) => Some(task),
            _ => None,
        }
    }

    fn redraw_if(changed: bool) -> Self {
        if changed {
            Self::Redraw
        } else {
            Self::None
        }
    }
}

/// Result of [`AudioPlayer::handle_key`].
#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub effect: Effect,
    /// The key was bound and should not reach other handlers.
    pub handled: bool,
    /// The host should suppress the key's default behavior.
    pub prevent_default: bool,
}

/// The player engine. See the [module docs](self).
pub struct AudioPlayer {
    binder: LifecycleBinder,
    inbox: UnboundedReceiver<Envelope>,
    scope: Rc<dyn PointerScope>,
    seek: SeekCoordinator,
    volume: VolumeController,
    tracker: PositionTracker,
    progress: Throttle<()>,
    listen: Throttle<f64>,
    keys: KeyBindings,
    callbacks: Callbacks,
    initial_volume: Volume,
    loop_enabled: bool,
    autoplay_after_src_change: bool,
}

impl AudioPlayer {
    /// Creates an unbound player with local seeking and no callbacks.
    #[must_use]
    pub fn new(config: &PlayerConfig, scope: Rc<dyn PointerScope>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            binder: LifecycleBinder::new(tx),
            inbox: rx,
            seek: SeekCoordinator::new(SeekStrategy::Local, Rc::clone(&scope)),
            volume: VolumeController::new(
                Rc::clone(&scope),
                VolumeMemory::new(config.configured_volume()),
            ),
            scope,
            tracker: PositionTracker::new(config.fixed_duration_secs()),
            progress: Throttle::new(config.progress_update_interval()),
            listen: Throttle::new(config.listen_interval()),
            keys: KeyBindings::from_config(config),
            callbacks: Callbacks::default(),
            initial_volume: config.initial_volume(),
            loop_enabled: config.loop_enabled(),
            autoplay_after_src_change: config.autoplay_after_src_change(),
        }
    }

    /// Selects how released seek gestures are committed.
    #[must_use]
    pub fn with_seek_strategy(mut self, strategy: SeekStrategy) -> Self {
        self.seek = SeekCoordinator::new(strategy, Rc::clone(&self.scope));
        self
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    // =========================================================================
    // Source lifecycle
    // =========================================================================

    /// Binds a media resource, replacing the current one.
    ///
    /// Binding the resource already bound does nothing. Otherwise every gesture
    /// is abandoned, pending deliveries are discarded and the initial volume
    /// and loop flag are applied.
    pub fn bind(&mut self, media: Rc<dyn MediaHandle>) -> Effect {
        if let BindOutcome::Unchanged = self.binder.bind(Rc::clone(&media)) {
            return Effect::None;
        }
        self.reset_gestures();
        media.set_volume(self.initial_volume.value());
        media.set_loop(self.loop_enabled);
        self.volume.sync_from_media(media.as_ref());
        self.tracker.on_tick(media.as_ref(), Interaction::Idle);
        Effect::Redraw
    }

    /// Detaches from the bound resource.
    pub fn unbind(&mut self) -> Effect {
        if !self.binder.unbind() {
            return Effect::None;
        }
        self.reset_gestures();
        self.tracker.reset();
        Effect::Redraw
    }

    /// Notifies the player that the bound resource was given a new source.
    pub fn source_changed(&mut self) -> Effect {
        let Some(media) = self.binder.media().cloned() else {
            return Effect::None;
        };
        self.reset_gestures();
        self.tracker.on_tick(media.as_ref(), Interaction::Idle);
        self.volume.sync_from_media(media.as_ref());

        if !self.autoplay_after_src_change {
            return Effect::Redraw;
        }
        match commands::request_play(media.as_ref()) {
            Ok(request) => Effect::Task(PlayerTask::play(request)),
            Err(error) => {
                self.callbacks.report(&error);
                Effect::Redraw
            }
        }
    }

    fn reset_gestures(&mut self) {
        self.seek.reset();
        self.volume.reset();
        self.progress.cancel();
        self.listen.cancel();
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Processes one input message.
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::SeekSettled {
                ticket,
                target_secs,
                result,
            } => self.settle_seek(ticket, target_secs, result),
            Message::PlaySettled { result } => {
                if let Err(message) = result {
                    self.callbacks
                        .report(&PlaybackError::PlayRequestRejected(message));
                }
                Effect::Redraw
            }
            Message::Command(command) => self.execute(command),
            pointer => {
                let Some(media) = self.binder.media().cloned() else {
                    return Effect::None;
                };
                self.handle_pointer(&media, pointer)
            }
        }
    }

    fn handle_pointer(&mut self, media: &Rc<dyn MediaHandle>, message: Message) -> Effect {
        match message {
            Message::SeekPressed { point, bounds } => Effect::redraw_if(self.seek.press(
                media.as_ref(),
                &self.tracker,
                point,
                bounds,
            )),
            Message::SeekMoved { point, bounds } => Effect::redraw_if(self.seek.drag_to(
                media.as_ref(),
                &self.tracker,
                point,
                bounds,
            )),
            Message::SeekReleased => match self.seek.release(media, &mut self.tracker) {
                ReleaseOutcome::Ignored => Effect::None,
                ReleaseOutcome::Committed | ReleaseOutcome::Skipped => {
                    self.schedule_tick();
                    Effect::Redraw
                }
                ReleaseOutcome::Failed(error) => {
                    self.callbacks.report(&error);
                    Effect::Redraw
                }
                ReleaseOutcome::Pending(pending) => {
                    let seek::PendingSeek {
                        ticket,
                        target_secs,
                        request,
                    } = pending;
                    Effect::Task(PlayerTask::new(async move {
                        Message::SeekSettled {
                            ticket,
                            target_secs,
                            result: request.await,
                        }
                    }))
                }
            },
            Message::VolumePressed { point, bounds } => {
                Effect::redraw_if(self.volume.press(media.as_ref(), point, bounds))
            }
            Message::VolumeMoved { point, bounds } => {
                Effect::redraw_if(self.volume.drag_to(media.as_ref(), point, bounds))
            }
            Message::VolumeReleased => Effect::redraw_if(self.volume.release()),
            Message::Command(_) | Message::SeekSettled { .. } | Message::PlaySettled { .. } => {
                Effect::None
            }
        }
    }

    fn settle_seek(
        &mut self,
        ticket: SeekTicket,
        target_secs: f64,
        result: Result<(), String>,
    ) -> Effect {
        let settlement = self.seek.settle(&mut self.tracker, ticket, target_secs, result);
        if let Some(error) = &settlement.error {
            self.callbacks.report(error);
        }
        if settlement.applied {
            self.schedule_tick();
        }
        Effect::redraw_if(settlement.applied)
    }

    /// Maps a key press to a command and runs it.
    pub fn handle_key(&mut self, key: &iced_keyboard::Key, focus: FocusTarget) -> KeyOutcome {
        let Some(action) = self.keys.resolve(key, focus) else {
            return KeyOutcome::default();
        };
        tracing::debug!(command = ?action.command, "key shortcut");
        KeyOutcome {
            effect: self.execute(action.command),
            handled: true,
            prevent_default: action.prevent_default,
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Runs a playback command against the bound resource.
    pub fn execute(&mut self, command: Command) -> Effect {
        let Some(media) = self.binder.media().cloned() else {
            return Effect::None;
        };
        let media = media.as_ref();
        match command {
            Command::TogglePlayPause => match commands::toggle_play_pause(media) {
                Ok(PlayToggle::Requested(request)) => Effect::Task(PlayerTask::play(request)),
                Ok(PlayToggle::Paused) => Effect::Redraw,
                Ok(PlayToggle::Unchanged) => Effect::None,
                Err(error) => {
                    self.callbacks.report(&error);
                    Effect::None
                }
            },
            Command::JumpBy(delta_ms) => match commands::jump_by(media, &self.tracker, delta_ms) {
                Ok(Jump::Moved { from, to }) => {
                    tracing::debug!(from, to, "jumped");
                    self.schedule_tick();
                    Effect::Redraw
                }
                Ok(Jump::Skipped) => Effect::None,
                Err(error) => {
                    self.callbacks.report(&error);
                    Effect::None
                }
            },
            Command::JumpVolumeBy(delta) => {
                commands::jump_volume_by(media, self.volume.memory_mut(), delta);
                Effect::redraw_if(self.volume.sync_from_media(media))
            }
            Command::ToggleLoop => {
                commands::toggle_loop(media);
                Effect::Redraw
            }
            Command::ToggleMute => {
                commands::toggle_mute(media, self.volume.memory_mut());
                self.volume.sync_from_media(media);
                Effect::Redraw
            }
        }
    }

    pub fn toggle_play_pause(&mut self) -> Effect {
        self.execute(Command::TogglePlayPause)
    }

    pub fn jump_by(&mut self, delta_ms: i64) -> Effect {
        self.execute(Command::JumpBy(delta_ms))
    }

    pub fn jump_volume_by(&mut self, delta: f64) -> Effect {
        self.execute(Command::JumpVolumeBy(delta))
    }

    pub fn toggle_loop(&mut self) -> Effect {
        self.execute(Command::ToggleLoop)
    }

    pub fn toggle_mute(&mut self) -> Effect {
        self.execute(Command::ToggleMute)
    }

    // =========================================================================
    // Media events and timers
    // =========================================================================

    /// Processes every queued media event. Events raised by a resource that
    /// is no longer bound are dropped.
    pub fn dispatch_media_events(&mut self) -> Effect {
        let mut redraw = false;
        while let Ok(envelope) = self.inbox.try_recv() {
            if !self.binder.is_current(&envelope) {
                tracing::debug!(kind = %envelope.event.kind, "dropping event from unbound media");
                continue;
            }
            redraw |= self.on_media_event(envelope.event);
        }
        Effect::redraw_if(redraw)
    }

    fn on_media_event(&mut self, event: MediaEvent) -> bool {
        let Some(media) = self.binder.media().cloned() else {
            return false;
        };
        match Route::for_kind(event.kind) {
            Route::TimeUpdate => {
                let now = Instant::now();
                self.progress.call(now, ());
                self.listen.call(now, media.current_time());
                self.callbacks.emit(&event);
                false
            }
            Route::Error => {
                let current = media.current_time();
                if current == media.duration() {
                    // Some sources fail right at the end instead of ending
                    tracing::debug!("error at end of media treated as ended");
                    self.callbacks.emit(&MediaEvent::new(MediaEventKind::Ended));
                } else {
                    let message = event
                        .message
                        .clone()
                        .or_else(|| media.error())
                        .unwrap_or_else(|| "unknown media error".to_string());
                    self.callbacks.report(&PlaybackError::Media(message));
                    self.callbacks.emit(&event);
                }
                true
            }
            Route::PlaybackChange => {
                self.callbacks.emit(&event);
                true
            }
            Route::VolumeChange => {
                let changed = self.volume.sync_from_media(media.as_ref());
                self.callbacks.emit(&event);
                changed
            }
            Route::Notify => {
                self.callbacks.emit(&event);
                false
            }
        }
    }

    fn schedule_tick(&mut self) {
        self.progress.call(Instant::now(), ());
    }

    /// Runs every throttled delivery that is due.
    pub fn fire_due_timers(&mut self) -> Effect {
        let now = Instant::now();
        let mut redraw = false;
        if self.progress.poll(now).is_some() {
            if let Some(media) = self.binder.media().cloned() {
                redraw = self
                    .tracker
                    .on_tick(media.as_ref(), self.seek.interaction());
            }
        }
        if let Some(current_time) = self.listen.poll(now) {
            self.callbacks.listen(current_time);
        }
        Effect::redraw_if(redraw)
    }

    /// Earliest pending throttled delivery.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.progress.deadline(), self.listen.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Sleeps until the next throttled delivery and fires it.
    ///
    /// Never resolves while nothing is scheduled, so it belongs in a
    /// `select!` next to the host's other input sources.
    pub async fn wait_for_timers(&mut self) -> Effect {
        match self.next_deadline() {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.fire_due_timers()
            }
            None => std::future::pending::<Effect>().await,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Position to paint on the seek track.
    #[must_use]
    pub fn rendered_position(&self) -> Ratio {
        self.seek
            .interaction()
            .draft()
            .unwrap_or_else(|| self.tracker.rendered())
    }

    /// Volume to paint on the volume track.
    #[must_use]
    pub fn rendered_volume(&self) -> Volume {
        self.volume.rendered()
    }

    #[must_use]
    pub fn seek_interaction(&self) -> Interaction {
        self.seek.interaction()
    }

    #[must_use]
    pub fn volume_interaction(&self) -> Interaction {
        self.volume.interaction()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.binder
            .media()
            .is_some_and(|media| !media.is_paused() && !media.is_ended())
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.binder.media().is_some_and(|media| media.is_looping())
    }

    #[must_use]
    pub fn media(&self) -> Option<&Rc<dyn MediaHandle>> {
        self.binder.media()
    }

    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.keys
    }
}

impl fmt::Debug for AudioPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("binder", &self.binder)
            .field("seek", &self.seek.interaction())
            .field("volume", &self.volume.interaction())
            .field("position", &self.tracker.rendered())
            .finish_non_exhaustive()
    }
}
