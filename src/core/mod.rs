//! Core game module - states, events, easing and clock helpers.
//!
//! This module provides the foundation the boss and projectile plugins build upon.

pub mod clock;
mod easing;
mod events;
mod plugin;
mod states;

pub use easing::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
