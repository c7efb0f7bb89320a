// SPDX-License-Identifier: MPL-2.0
//! Capability interface of the controllable media resource.
//!
//! The player never owns the resource. It commands it through
//! [`MediaHandle`] and observes it through the fixed set of lifecycle events
//! in [`MediaEventKind`].

pub mod events;
pub mod handle;

// Re-export commonly used types
pub use events::{MediaEvent, MediaEventKind, ReadyState};
pub use handle::{EventHandler, MediaHandle, PlayRequest, SubscriptionId};
