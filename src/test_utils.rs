// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and in-memory collaborators.
//!
//! This module re-exports the `approx` crate's assertion macros for float
//! comparison and provides fakes for the media resource, the pointer scope
//! and the seek delegate.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::media::{
    EventHandler, MediaEvent, MediaEventKind, MediaHandle, PlayRequest, ReadyState, SubscriptionId,
};
use crate::player::{CaptureId, Control, PointerScope, SeekDelegate, SeekRequest};
use futures_util::future::{self, FutureExt};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

// =============================================================================
// FakeMedia
// =============================================================================

/// Observable state of a [`FakeMedia`].
#[derive(Debug, Clone)]
pub struct FakeState {
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub looping: bool,
    pub paused: bool,
    pub ended: bool,
    pub ready_state: ReadyState,
    pub error: Option<String>,
    pub has_source: bool,
    pub load_result: Result<(), String>,
    /// Duration after a successful load. `None` keeps the current one.
    pub loaded_duration: Option<f64>,
    pub play_result: Result<(), String>,
    pub load_calls: u32,
    pub play_calls: u32,
    pub set_time_calls: Vec<f64>,
}

/// In-memory media resource. Events are only raised through [`FakeMedia::emit`].
pub struct FakeMedia {
    state: RefCell<FakeState>,
    listeners: RefCell<Vec<(MediaEventKind, SubscriptionId, EventHandler)>>,
    next_id: Cell<u64>,
}

impl FakeMedia {
    /// Paused, seekable media with a source, at time 0 and full volume.
    pub fn new(duration: f64) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(FakeState {
                current_time: 0.0,
                duration,
                volume: 1.0,
                looping: false,
                paused: true,
                ended: false,
                ready_state: ReadyState::HaveEnoughData,
                error: None,
                has_source: true,
                load_result: Ok(()),
                loaded_duration: None,
                play_result: Ok(()),
                load_calls: 0,
                play_calls: 0,
                set_time_calls: Vec::new(),
            }),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn handle(self: &Rc<Self>) -> Rc<dyn MediaHandle> {
        Rc::clone(self) as Rc<dyn MediaHandle>
    }

    pub fn with_state(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut *self.state.borrow_mut());
    }

    pub fn state(&self) -> FakeState {
        self.state.borrow().clone()
    }

    /// Invokes every handler attached for `event.kind`.
    pub fn emit(&self, event: MediaEvent) {
        let handlers: Vec<EventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _, _)| *kind == event.kind)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(event.clone());
        }
    }

    pub fn listener_count(&self, kind: MediaEventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl MediaHandle for FakeMedia {
    fn play(&self) -> PlayRequest {
        let mut state = self.state.borrow_mut();
        state.play_calls += 1;
        let result = state.play_result.clone();
        if result.is_ok() {
            state.paused = false;
            state.ended = false;
        }
        future::ready(result).boxed_local()
    }

    fn pause(&self) {
        self.state.borrow_mut().paused = true;
    }

    fn load(&self) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.load_calls += 1;
        state.load_result.clone()?;
        state.error = None;
        state.ready_state = ReadyState::HaveEnoughData;
        if let Some(duration) = state.loaded_duration {
            state.duration = duration;
        }
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn set_current_time(&self, secs: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time = secs;
        state.set_time_calls.push(secs);
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    fn is_looping(&self) -> bool {
        self.state.borrow().looping
    }

    fn set_loop(&self, enabled: bool) {
        self.state.borrow_mut().looping = enabled;
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn is_ended(&self) -> bool {
        self.state.borrow().ended
    }

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready_state
    }

    fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    fn has_source(&self) -> bool {
        self.state.borrow().has_source
    }

    fn subscribe(&self, kind: MediaEventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((kind, id, handler));
        id
    }

    fn unsubscribe(&self, kind: MediaEventKind, id: SubscriptionId) {
        self.listeners
            .borrow_mut()
            .retain(|(k, existing, _)| !(*k == kind && *existing == id));
    }
}

// =============================================================================
// FakeScope
// =============================================================================

/// Pointer scope that records active captures.
#[derive(Default)]
pub struct FakeScope {
    active: RefCell<HashSet<(Control, CaptureId)>>,
    total: Cell<u64>,
}

impl FakeScope {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    pub fn total_captures(&self) -> u64 {
        self.total.get()
    }
}

impl PointerScope for FakeScope {
    fn capture(&self, control: Control) -> CaptureId {
        let id = CaptureId(self.total.get());
        self.total.set(id.0 + 1);
        self.active.borrow_mut().insert((control, id));
        id
    }

    fn release(&self, control: Control, id: CaptureId) {
        self.active.borrow_mut().remove(&(control, id));
    }
}

// =============================================================================
// FakeDelegate
// =============================================================================

/// Seek delegate that resolves immediately and records its targets.
#[derive(Default)]
pub struct FakeDelegate {
    targets: RefCell<Vec<f64>>,
    failure: RefCell<Option<String>>,
}

impl FakeDelegate {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }

    pub fn targets(&self) -> Vec<f64> {
        self.targets.borrow().clone()
    }
}

impl SeekDelegate for FakeDelegate {
    fn seek(&self, _media: Rc<dyn MediaHandle>, target_secs: f64) -> SeekRequest {
        self.targets.borrow_mut().push(target_secs);
        let result = match self.failure.borrow().clone() {
            Some(message) => Err(message),
            None => Ok(()),
        };
        future::ready(result).boxed_local()
    }
}
