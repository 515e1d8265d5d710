//! Projectiles module - bullets, bombs, telegraph markers and their lifetimes.

mod components;
mod plugin;
mod spawning;
mod systems;

pub use components::*;
pub use plugin::ProjectilePlugin;
pub use spawning::{spawn_marker, spawn_projectile};
pub use systems::{advance_projectiles, forward_projectile_contacts};
