// SPDX-License-Identifier: MPL-2.0
//! Lifecycle events and readiness levels reported by a media resource.

use std::fmt;

/// The fixed set of lifecycle events the player subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEventKind {
    Play,
    Playing,
    Pause,
    Ended,
    Abort,
    Error,
    Seeking,
    Seeked,
    Waiting,
    Stalled,
    Suspend,
    TimeUpdate,
    LoadStart,
    LoadedMetadata,
    LoadedData,
    Emptied,
    CanPlay,
    CanPlayThrough,
    VolumeChange,
    Encrypted,
}

impl MediaEventKind {
    /// Every kind, in subscription order.
    pub const ALL: [Self; 20] = [
        Self::Play,
        Self::Playing,
        Self::Pause,
        Self::Ended,
        Self::Abort,
        Self::Error,
        Self::Seeking,
        Self::Seeked,
        Self::Waiting,
        Self::Stalled,
        Self::Suspend,
        Self::TimeUpdate,
        Self::LoadStart,
        Self::LoadedMetadata,
        Self::LoadedData,
        Self::Emptied,
        Self::CanPlay,
        Self::CanPlayThrough,
        Self::VolumeChange,
        Self::Encrypted,
    ];

    /// Event name as used by media elements.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Playing => "playing",
            Self::Pause => "pause",
            Self::Ended => "ended",
            Self::Abort => "abort",
            Self::Error => "error",
            Self::Seeking => "seeking",
            Self::Seeked => "seeked",
            Self::Waiting => "waiting",
            Self::Stalled => "stalled",
            Self::Suspend => "suspend",
            Self::TimeUpdate => "timeupdate",
            Self::LoadStart => "loadstart",
            Self::LoadedMetadata => "loadedmetadata",
            Self::LoadedData => "loadeddata",
            Self::Emptied => "emptied",
            Self::CanPlay => "canplay",
            Self::CanPlayThrough => "canplaythrough",
            Self::VolumeChange => "volumechange",
            Self::Encrypted => "encrypted",
        }
    }

    /// Position of this kind in [`MediaEventKind::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MediaEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One event raised by the media resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub kind: MediaEventKind,
    /// Native error description, only meaningful for [`MediaEventKind::Error`].
    pub message: Option<String>,
}

impl MediaEvent {
    #[must_use]
    pub fn new(kind: MediaEventKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: MediaEventKind::Error,
            message: Some(message.into()),
        }
    }
}

/// How much of the resource is available, mirroring media element levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    /// Nothing is known about the resource.
    #[default]
    HaveNothing,
    /// Duration and dimensions are known; no frame data yet.
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Returns true if assigning a position is expected to work without a
    /// reload first.
    #[must_use]
    pub fn is_seekable(self) -> bool {
        self > Self::HaveMetadata
    }
}
