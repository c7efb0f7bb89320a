// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Playback Error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Failures reported by the player to the host.
///
/// None of these are ever returned from a public player operation. They are
/// delivered through the reporting callbacks registered in
/// [`Callbacks`](crate::player::Callbacks).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The media resource rejected a play request (e.g. autoplay policy).
    #[error("play request rejected: {0}")]
    PlayRequestRejected(String),

    /// Forced reload before a jump or seek failed. The triggering operation
    /// was aborted.
    #[error("failed to reinitialize media: {0}")]
    Reinitialization(String),

    /// The external seek delegate rejected a seek.
    #[error("delegated seek to {target_secs:.3}s failed: {message}")]
    DelegatedSeek { target_secs: f64, message: String },

    /// The media resource raised a native error event.
    #[error("media error: {0}")]
    Media(String),
}

impl PlaybackError {
    /// Short machine-readable tag, handy for logs and host-side matching.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PlaybackError::PlayRequestRejected(_) => "play-request-rejected",
            PlaybackError::Reinitialization(_) => "reinitialization",
            PlaybackError::DelegatedSeek { .. } => "delegated-seek",
            PlaybackError::Media(_) => "media",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
