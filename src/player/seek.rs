// SPDX-License-Identifier: MPL-2.0
//! Seek control: local assignment or delegated asynchronous seeking.
//!
//! With [`SeekStrategy::Local`] the media position follows the pointer live
//! and is committed on release. With [`SeekStrategy::Delegated`] the pointer
//! only moves a draft; on release the target is handed to a [`SeekDelegate`]
//! and the control waits in [`Interaction::AwaitingSeek`] until the outcome
//! comes back through [`SeekCoordinator::settle`].
//!
//! Every delegated request carries a [`SeekTicket`]. Only the settlement of
//! the ticket currently awaited ends the wait, so a late answer to a
//! superseded request can neither reapply an old position nor interrupt a
//! newer drag.

use super::drag::{Control, DragController, PointerScope};
use super::position::PositionTracker;
use crate::domain::player::{Interaction, Ratio, SeekTicket};
use crate::error::PlaybackError;
use crate::media::MediaHandle;
use futures_util::future::LocalBoxFuture;
use iced_core::{Point, Rectangle};
use std::fmt;
use std::rc::Rc;

/// Pending outcome of a delegated seek.
pub type SeekRequest = LocalBoxFuture<'static, Result<(), String>>;

/// Host-provided seek implementation for sources where seeking is a remote
/// operation (e.g. re-requesting a byte range).
pub trait SeekDelegate {
    fn seek(&self, media: Rc<dyn MediaHandle>, target_secs: f64) -> SeekRequest;
}

/// How released seek gestures are committed. Chosen once at construction.
#[derive(Clone, Default)]
pub enum SeekStrategy {
    #[default]
    Local,
    Delegated(Rc<dyn SeekDelegate>),
}

impl fmt::Debug for SeekStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Delegated(_) => f.write_str("Delegated(..)"),
        }
    }
}

/// A delegated seek handed back to the caller for driving.
pub struct PendingSeek {
    pub ticket: SeekTicket,
    pub target_secs: f64,
    pub request: SeekRequest,
}

impl fmt::Debug for PendingSeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSeek")
            .field("ticket", &self.ticket)
            .field("target_secs", &self.target_secs)
            .finish_non_exhaustive()
    }
}

/// Result of releasing the seek track.
#[derive(Debug)]
pub enum ReleaseOutcome {
    /// No drag was active.
    Ignored,
    /// The position was committed locally.
    Committed,
    /// The target time could not be computed; nothing was committed.
    Skipped,
    /// The forced reload failed; the rendered position was reset.
    Failed(PlaybackError),
    /// A delegated seek was started.
    Pending(PendingSeek),
}

/// Result of settling a delegated seek.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// True if the settled ticket was the one awaited.
    pub applied: bool,
    /// Failure to report, whether or not the ticket was current.
    pub error: Option<PlaybackError>,
}

/// Arbitrates between pointer drafts, media time and delegated seeks.
#[derive(Debug)]
pub struct SeekCoordinator {
    strategy: SeekStrategy,
    interaction: Interaction,
    drag: DragController,
    last_ticket: SeekTicket,
}

impl SeekCoordinator {
    #[must_use]
    pub fn new(strategy: SeekStrategy, scope: Rc<dyn PointerScope>) -> Self {
        Self {
            strategy,
            interaction: Interaction::Idle,
            drag: DragController::new(Control::Seek, scope),
            last_ticket: SeekTicket::default(),
        }
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[must_use]
    pub fn is_delegated(&self) -> bool {
        matches!(self.strategy, SeekStrategy::Delegated(_))
    }

    /// Starts a drag. A press while a delegated seek is outstanding
    /// supersedes the wait. Returns true if the state changed.
    pub fn press(
        &mut self,
        media: &dyn MediaHandle,
        tracker: &PositionTracker,
        point: Point,
        bounds: Option<Rectangle>,
    ) -> bool {
        let Some(draft) = self.drag.press(point, bounds) else {
            return false;
        };
        if let Some(ticket) = self.interaction.ticket() {
            tracing::debug!(ticket = ticket.value(), "new drag supersedes outstanding seek");
        }
        self.move_draft(media, tracker, draft);
        true
    }

    /// Follows the pointer while dragging. Returns true if the state changed.
    pub fn drag_to(
        &mut self,
        media: &dyn MediaHandle,
        tracker: &PositionTracker,
        point: Point,
        bounds: Option<Rectangle>,
    ) -> bool {
        if !self.interaction.is_dragging() {
            return false;
        }
        let Some(draft) = self.drag.drag_to(point, bounds) else {
            return false;
        };
        self.move_draft(media, tracker, draft);
        true
    }

    fn move_draft(&mut self, media: &dyn MediaHandle, tracker: &PositionTracker, draft: Ratio) {
        self.interaction = Interaction::Dragging { draft };
        if let SeekStrategy::Local = self.strategy {
            let target = tracker.time_at(media, draft);
            if target.is_finite() {
                media.set_current_time(target);
            }
        }
    }

    /// Ends the drag and commits the draft.
    ///
    /// The pointer capture is always released first, whatever the commit
    /// outcome.
    pub fn release(
        &mut self,
        media: &Rc<dyn MediaHandle>,
        tracker: &mut PositionTracker,
    ) -> ReleaseOutcome {
        self.drag.release();
        let Interaction::Dragging { draft } = self.interaction else {
            return ReleaseOutcome::Ignored;
        };

        match &self.strategy {
            SeekStrategy::Local => {
                self.interaction = Interaction::Idle;
                let outcome = commit_local(media.as_ref(), tracker, draft);
                if !matches!(outcome, ReleaseOutcome::Failed(_)) {
                    tracker.set_rendered(draft);
                }
                outcome
            }
            SeekStrategy::Delegated(delegate) => {
                let target_secs = tracker.time_at(media.as_ref(), draft);
                if !target_secs.is_finite() {
                    tracing::debug!("delegated seek skipped, duration unknown");
                    self.interaction = Interaction::Idle;
                    tracker.set_rendered(draft);
                    return ReleaseOutcome::Skipped;
                }
                let ticket = self.last_ticket.next();
                self.last_ticket = ticket;
                self.interaction = Interaction::AwaitingSeek { draft, ticket };
                tracing::debug!(ticket = ticket.value(), target_secs, "delegated seek started");
                let request = delegate.seek(Rc::clone(media), target_secs);
                ReleaseOutcome::Pending(PendingSeek {
                    ticket,
                    target_secs,
                    request,
                })
            }
        }
    }

    /// Applies the outcome of a delegated seek.
    ///
    /// A successful current seek leaves its draft as the rendered position.
    /// A failed one keeps the position from before the drag.
    pub fn settle(
        &mut self,
        tracker: &mut PositionTracker,
        ticket: SeekTicket,
        target_secs: f64,
        result: Result<(), String>,
    ) -> Settlement {
        let applied = self.interaction.ticket() == Some(ticket);
        if applied {
            if let (Some(draft), Ok(())) = (self.interaction.draft(), &result) {
                tracker.set_rendered(draft);
            }
            self.interaction = Interaction::Idle;
        } else {
            tracing::debug!(ticket = ticket.value(), "stale seek settlement ignored");
        }
        let error = result.err().map(|message| PlaybackError::DelegatedSeek {
            target_secs,
            message,
        });
        Settlement { applied, error }
    }

    /// Abandons any gesture or wait and releases the pointer.
    pub fn reset(&mut self) {
        self.drag.release();
        self.interaction = Interaction::Idle;
    }
}

fn commit_local(
    media: &dyn MediaHandle,
    tracker: &mut PositionTracker,
    draft: Ratio,
) -> ReleaseOutcome {
    let mut target = tracker.time_at(media, draft);
    if !media.ready_state().is_seekable() || !target.is_finite() {
        if let Err(message) = media.load() {
            tracker.reset();
            return ReleaseOutcome::Failed(PlaybackError::Reinitialization(message));
        }
        target = tracker.time_at(media, draft);
    }
    if !target.is_finite() {
        return ReleaseOutcome::Skipped;
    }
    media.set_current_time(target);
    ReleaseOutcome::Committed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ReadyState;
    use crate::test_utils::{assert_abs_diff_eq, FakeDelegate, FakeMedia, FakeScope};

    fn track() -> Option<Rectangle> {
        Some(Rectangle {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 8.0,
        })
    }

    fn at(x: f32) -> Point {
        Point::new(x, 4.0)
    }

    #[test]
    fn local_press_and_move_assign_time_live() {
        let media = FakeMedia::new(200.0);
        let tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, FakeScope::new());

        assert!(seek.press(&*media, &tracker, at(25.0), track()));
        assert_abs_diff_eq!(media.state().current_time, 50.0);

        assert!(seek.drag_to(&*media, &tracker, at(75.0), track()));
        assert_abs_diff_eq!(media.state().current_time, 150.0);
        assert_eq!(
            seek.interaction(),
            Interaction::Dragging {
                draft: Ratio::new(0.75)
            }
        );
    }

    #[test]
    fn local_release_commits_and_returns_idle() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let scope = FakeScope::new();
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, scope.clone());

        seek.press(&*media, &tracker, at(40.0), track());
        let outcome = seek.release(&handle, &mut tracker);

        assert!(matches!(outcome, ReleaseOutcome::Committed));
        assert!(seek.interaction().is_idle());
        assert_eq!(tracker.rendered(), Ratio::new(0.4));
        assert_abs_diff_eq!(media.state().current_time, 80.0);
        assert_eq!(scope.active_count(), 0);
        assert_eq!(media.state().load_calls, 0);
    }

    #[test]
    fn local_release_reloads_unseekable_media_first() {
        let media = FakeMedia::new(200.0);
        media.with_state(|s| s.ready_state = ReadyState::HaveMetadata);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, FakeScope::new());

        seek.press(&*media, &tracker, at(50.0), track());
        let outcome = seek.release(&handle, &mut tracker);

        assert!(matches!(outcome, ReleaseOutcome::Committed));
        assert_eq!(media.state().load_calls, 1);
        assert_abs_diff_eq!(media.state().current_time, 100.0);
    }

    #[test]
    fn local_release_reload_failure_resets_position_and_reports() {
        let media = FakeMedia::new(200.0);
        media.with_state(|s| {
            s.current_time = 100.0;
            s.ready_state = ReadyState::HaveNothing;
            s.load_result = Err("network gone".into());
        });
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        tracker.on_tick(&*media, Interaction::Idle);
        let scope = FakeScope::new();
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, scope.clone());

        seek.press(&*media, &tracker, at(90.0), track());
        let outcome = seek.release(&handle, &mut tracker);

        match outcome {
            ReleaseOutcome::Failed(PlaybackError::Reinitialization(message)) => {
                assert_eq!(message, "network gone");
            }
            other => panic!("expected reinitialization failure, got {other:?}"),
        }
        assert!(seek.interaction().is_idle());
        assert_eq!(tracker.rendered(), Ratio::ZERO);
        assert_eq!(scope.active_count(), 0, "capture released despite failure");
    }

    #[test]
    fn delegated_press_only_records_draft() {
        let media = FakeMedia::new(200.0);
        media.with_state(|s| s.current_time = 10.0);
        let tracker = PositionTracker::new(None);
        let delegate = FakeDelegate::new();
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(delegate.clone()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(60.0), track());

        assert_abs_diff_eq!(media.state().current_time, 10.0);
        assert!(seek.is_delegated());
        assert!(delegate.targets().is_empty());
    }

    #[test]
    fn delegated_release_awaits_then_settles() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let delegate = FakeDelegate::new();
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(delegate.clone()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(60.0), track());
        let pending = match seek.release(&handle, &mut tracker) {
            ReleaseOutcome::Pending(pending) => pending,
            other => panic!("expected pending seek, got {other:?}"),
        };

        assert_abs_diff_eq!(pending.target_secs, 120.0);
        assert_eq!(delegate.targets(), vec![120.0]);
        assert!(seek.interaction().is_awaiting_seek());

        let settlement = seek.settle(&mut tracker, pending.ticket, pending.target_secs, Ok(()));
        assert!(settlement.applied);
        assert!(settlement.error.is_none());
        assert!(seek.interaction().is_idle());
        assert_eq!(tracker.rendered(), Ratio::new(0.6));
    }

    #[test]
    fn delegated_failure_reports_and_returns_idle() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(FakeDelegate::new()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(10.0), track());
        let ReleaseOutcome::Pending(pending) = seek.release(&handle, &mut tracker) else {
            panic!("expected pending seek");
        };
        let settlement = seek.settle(
            &mut tracker,
            pending.ticket,
            pending.target_secs,
            Err("416".into()),
        );

        assert!(settlement.applied);
        assert_eq!(
            settlement.error,
            Some(PlaybackError::DelegatedSeek {
                target_secs: 20.0,
                message: "416".into()
            })
        );
        assert!(seek.interaction().is_idle());
        assert_eq!(tracker.rendered(), Ratio::ZERO, "failed seek keeps old position");
    }

    #[test]
    fn stale_settlement_does_not_disturb_newer_drag() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(FakeDelegate::new()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(10.0), track());
        let ReleaseOutcome::Pending(first) = seek.release(&handle, &mut tracker) else {
            panic!("expected pending seek");
        };
        seek.press(&*media, &tracker, at(80.0), track());

        let settlement = seek.settle(
            &mut tracker,
            first.ticket,
            first.target_secs,
            Err("late".into()),
        );

        assert!(!settlement.applied);
        assert!(settlement.error.is_some(), "stale errors are still reported");
        assert_eq!(
            seek.interaction(),
            Interaction::Dragging {
                draft: Ratio::new(0.8)
            }
        );
    }

    #[test]
    fn stale_settlement_does_not_end_newer_wait() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(FakeDelegate::new()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(10.0), track());
        let ReleaseOutcome::Pending(first) = seek.release(&handle, &mut tracker) else {
            panic!("expected pending seek");
        };
        seek.press(&*media, &tracker, at(30.0), track());
        let ReleaseOutcome::Pending(second) = seek.release(&handle, &mut tracker) else {
            panic!("expected pending seek");
        };
        assert_ne!(first.ticket, second.ticket);

        assert!(
            !seek
                .settle(&mut tracker, first.ticket, first.target_secs, Ok(()))
                .applied
        );
        assert_eq!(seek.interaction().ticket(), Some(second.ticket));

        assert!(
            seek.settle(&mut tracker, second.ticket, second.target_secs, Ok(()))
                .applied
        );
        assert!(seek.interaction().is_idle());
    }

    #[test]
    fn delegated_release_without_duration_is_skipped() {
        let media = FakeMedia::new(f64::NAN);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let delegate = FakeDelegate::new();
        let mut seek = SeekCoordinator::new(
            SeekStrategy::Delegated(delegate.clone()),
            FakeScope::new(),
        );

        seek.press(&*media, &tracker, at(10.0), track());
        assert!(matches!(
            seek.release(&handle, &mut tracker),
            ReleaseOutcome::Skipped
        ));
        assert!(seek.interaction().is_idle());
        assert_eq!(tracker.rendered(), Ratio::new(0.1));
        assert!(delegate.targets().is_empty());
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let media = FakeMedia::new(200.0);
        let handle = media.handle();
        let mut tracker = PositionTracker::new(None);
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, FakeScope::new());

        assert!(matches!(
            seek.release(&handle, &mut tracker),
            ReleaseOutcome::Ignored
        ));
    }

    #[test]
    fn invalid_geometry_press_changes_nothing() {
        let media = FakeMedia::new(200.0);
        let tracker = PositionTracker::new(None);
        let scope = FakeScope::new();
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, scope.clone());

        assert!(!seek.press(&*media, &tracker, at(10.0), None));
        assert!(seek.interaction().is_idle());
        assert_eq!(scope.active_count(), 0);
    }

    #[test]
    fn reset_releases_capture_and_wait() {
        let media = FakeMedia::new(200.0);
        let tracker = PositionTracker::new(None);
        let scope = FakeScope::new();
        let mut seek = SeekCoordinator::new(SeekStrategy::Local, scope.clone());

        seek.press(&*media, &tracker, at(10.0), track());
        seek.reset();

        assert!(seek.interaction().is_idle());
        assert_eq!(scope.active_count(), 0);
    }
}
