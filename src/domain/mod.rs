// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core player value types with ZERO external dependencies.
//!
//! This module contains pure value objects and state enums. It has no
//! dependencies on external crates (except `std`) to keep them trivially
//! testable.
//!
//! # Modules
//!
//! - [`player`]: Playback control types ([`Ratio`](player::Ratio),
//!   [`Volume`](player::Volume), [`JumpStep`](player::JumpStep),
//!   [`Interaction`](player::Interaction))

pub mod player;
