// SPDX-License-Identifier: MPL-2.0
//! Pointer press/move/release handling for a horizontal track.
//!
//! Pressing a track captures the pointer at document level through the host's
//! [`PointerScope`], so moves and the release are seen even when the pointer
//! leaves the track. The capture is held by a [`PointerCapture`] guard and is
//! released whenever the guard is dropped: on release, on reset and when the
//! controller itself goes away.

use crate::domain::player::Ratio;
use iced_core::{Point, Rectangle};
use std::rc::Rc;

/// The two track controls of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Seek,
    Volume,
}

/// Identifies one pointer capture handed out by a [`PointerScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(pub u64);

/// Host-side document-level pointer listeners.
pub trait PointerScope {
    /// Starts routing document-wide pointer moves and releases to `control`.
    fn capture(&self, control: Control) -> CaptureId;

    /// Stops the routing started by the matching [`PointerScope::capture`].
    fn release(&self, control: Control, id: CaptureId);
}

/// Scoped pointer capture. Released on drop.
pub struct PointerCapture {
    scope: Rc<dyn PointerScope>,
    control: Control,
    id: CaptureId,
}

impl PointerCapture {
    #[must_use]
    pub fn acquire(scope: Rc<dyn PointerScope>, control: Control) -> Self {
        let id = scope.capture(control);
        tracing::debug!(?control, capture = id.0, "pointer captured");
        Self { scope, control, id }
    }

    #[must_use]
    pub fn id(&self) -> CaptureId {
        self.id
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.scope.release(self.control, self.id);
        tracing::debug!(control = ?self.control, capture = self.id.0, "pointer released");
    }
}

impl std::fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCapture")
            .field("control", &self.control)
            .field("id", &self.id)
            .finish()
    }
}

/// Maps a pointer position onto a track.
///
/// Returns `None` when the geometry cannot be used: no bounds, a zero or
/// negative width, or non-finite coordinates.
#[must_use]
pub fn ratio_at(point: Point, bounds: Option<Rectangle>) -> Option<Ratio> {
    let bounds = bounds?;
    let width = f64::from(bounds.width);
    let offset = f64::from(point.x) - f64::from(bounds.x);
    if !width.is_finite() || width <= 0.0 || !offset.is_finite() {
        return None;
    }
    Some(Ratio::new(offset / width))
}

/// Press/move/release state of one track.
pub struct DragController {
    control: Control,
    scope: Rc<dyn PointerScope>,
    capture: Option<PointerCapture>,
}

impl DragController {
    #[must_use]
    pub fn new(control: Control, scope: Rc<dyn PointerScope>) -> Self {
        Self {
            control,
            scope,
            capture: None,
        }
    }

    /// Starts a drag. Returns the pressed ratio, or `None` (and no state
    /// change) when the geometry is unusable.
    pub fn press(&mut self, point: Point, bounds: Option<Rectangle>) -> Option<Ratio> {
        let ratio = ratio_at(point, bounds)?;
        if self.capture.is_none() {
            self.capture = Some(PointerCapture::acquire(
                Rc::clone(&self.scope),
                self.control,
            ));
        }
        Some(ratio)
    }

    /// Follows the pointer. Ignored unless a drag is active.
    pub fn drag_to(&mut self, point: Point, bounds: Option<Rectangle>) -> Option<Ratio> {
        if self.capture.is_none() {
            return None;
        }
        ratio_at(point, bounds)
    }

    /// Ends the drag and releases the capture. Returns true if a drag was
    /// active.
    pub fn release(&mut self) -> bool {
        self.capture.take().is_some()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.capture.is_some()
    }

    #[must_use]
    pub fn control(&self) -> Control {
        self.control
    }
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("control", &self.control)
            .field("capture", &self.capture)
            .finish()
    }
}
