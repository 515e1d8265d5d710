//! Global events used for cross-system communication.
//!
//! The boss scheduler and the projectile systems share no state; everything
//! that crosses between them, or out to the rest of the game, goes through
//! these events.

use bevy::prelude::*;

use crate::boss::BossState;
use crate::projectiles::ProjectileKind;

/// What a [`BossCommand`] asks the boss to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAction {
    /// Cancel any current run and begin a fresh one.
    Start,
    /// Cancel the current run and go Idle.
    Stop,
}

/// Sent by the owning game loop to start or stop a boss.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossCommand {
    pub boss: Entity,
    pub action: BossAction,
}

impl BossCommand {
    pub fn start(boss: Entity) -> Self {
        Self {
            boss,
            action: BossAction::Start,
        }
    }

    pub fn stop(boss: Entity) -> Self {
        Self {
            boss,
            action: BossAction::Stop,
        }
    }
}

/// Sent when a boss moves from one attack pattern to the next.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossPatternChanged {
    pub boss: Entity,
    pub from: BossState,
    pub to: BossState,
}

/// Sent when a projectile's sensor starts touching another collider.
///
/// Nothing in this crate reacts to it. Damage, knockback and the like are
/// left to whatever system listens.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileContact {
    /// The projectile entity
    pub projectile: Entity,
    /// Whatever it touched
    pub other: Entity,
    pub kind: ProjectileKind,
}
