// SPDX-License-Identifier: MPL-2.0
//! Volume track control and mute memory.

use super::drag::{Control, DragController, PointerScope};
use crate::domain::player::{Interaction, Volume};
use crate::media::MediaHandle;
use iced_core::{Point, Rectangle};
use std::rc::Rc;

/// Last audible volume, restored when unmuting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeMemory(Volume);

impl VolumeMemory {
    /// Seeds the memory. A muted seed falls back to the default volume so
    /// unmuting is always audible.
    #[must_use]
    pub fn new(initial: Volume) -> Self {
        if initial.is_muted() {
            Self(Volume::default())
        } else {
            Self(initial)
        }
    }

    /// Records `volume` if it is audible.
    pub fn remember(&mut self, volume: Volume) {
        if !volume.is_muted() {
            self.0 = volume;
        }
    }

    #[must_use]
    pub fn last_audible(&self) -> Volume {
        self.0
    }
}

impl Default for VolumeMemory {
    fn default() -> Self {
        Self(Volume::default())
    }
}

/// Drag handling for the volume track. Never awaits anything: the media
/// volume is assigned as the pointer moves.
#[derive(Debug)]
pub struct VolumeController {
    interaction: Interaction,
    drag: DragController,
    memory: VolumeMemory,
    rendered: Volume,
}

impl VolumeController {
    #[must_use]
    pub fn new(scope: Rc<dyn PointerScope>, memory: VolumeMemory) -> Self {
        Self {
            interaction: Interaction::Idle,
            drag: DragController::new(Control::Volume, scope),
            memory,
            rendered: memory.last_audible(),
        }
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Volume to paint: the draft while dragging, else the media volume
    /// observed last.
    #[must_use]
    pub fn rendered(&self) -> Volume {
        self.interaction
            .draft()
            .map_or(self.rendered, Volume::from)
    }

    #[must_use]
    pub fn memory(&self) -> &VolumeMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut VolumeMemory {
        &mut self.memory
    }

    /// Starts a drag and assigns the pressed volume. Returns true if the
    /// state changed.
    pub fn press(
        &mut self,
        media: &dyn MediaHandle,
        point: Point,
        bounds: Option<Rectangle>,
    ) -> bool {
        let Some(draft) = self.drag.press(point, bounds) else {
            return false;
        };
        self.interaction = Interaction::Dragging { draft };
        self.apply(media, Volume::from(draft));
        true
    }

    /// Follows the pointer while dragging.
    pub fn drag_to(
        &mut self,
        media: &dyn MediaHandle,
        point: Point,
        bounds: Option<Rectangle>,
    ) -> bool {
        if !self.interaction.is_dragging() {
            return false;
        }
        let Some(draft) = self.drag.drag_to(point, bounds) else {
            return false;
        };
        self.interaction = Interaction::Dragging { draft };
        self.apply(media, Volume::from(draft));
        true
    }

    /// Ends the drag. Returns true if a drag was active.
    pub fn release(&mut self) -> bool {
        self.drag.release();
        let was_dragging = self.interaction.is_dragging();
        self.interaction = Interaction::Idle;
        was_dragging
    }

    /// Picks up a volume change made by the media or by another path.
    pub fn sync_from_media(&mut self, media: &dyn MediaHandle) -> bool {
        let volume = Volume::new(media.volume());
        self.memory.remember(volume);
        let changed = volume != self.rendered;
        self.rendered = volume;
        changed
    }

    pub fn reset(&mut self) {
        self.drag.release();
        self.interaction = Interaction::Idle;
    }

    fn apply(&mut self, media: &dyn MediaHandle, volume: Volume) {
        media.set_volume(volume.value());
        self.memory.remember(volume);
        self.rendered = volume;
    }
}
