//! Boss Barrage - a scripted boss attack-pattern scheduler for Bevy.
//!
//! A boss runs a fixed cycle of attack patterns against a player target:
//! side fire, a fan spread, a telegraphed bombardment and a charge that
//! glides back to where the boss spawned.
//!
//! # Architecture
//!
//! - **Core**: Game states, global events, easing and clock helpers
//! - **Boss**: Pattern scheduler, tunables, RON data loading, spawning
//! - **Projectiles**: Bullets, bombs, telegraph markers and their contacts

pub mod boss;
pub mod core;
pub mod projectiles;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
///
/// Rapier's physics plugin is left to the application, as projectile
/// contacts only need its collision events.
pub struct BossBarragePlugin;

impl Plugin for BossBarragePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(projectiles::ProjectilePlugin)
            .add_plugins(boss::BossPlugin);
    }
}
