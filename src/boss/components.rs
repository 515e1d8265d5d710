//! Boss-related components.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use super::host::{SpawnPoint, UniformSampler};
use crate::projectiles::{PrefabTemplate, ProjectileKind};

/// Marker component for boss entities.
#[derive(Component)]
pub struct Boss;

/// Marks a child entity as one of the boss's fire origins.
#[derive(Component, Debug, Clone, Copy)]
pub struct FirePoint(pub SpawnPoint);

/// Wiring between a boss and the entities its patterns read from.
///
/// Every reference is optional. A missing fire origin silences the shots
/// from it and a missing player skips the bombardment.
#[derive(Component, Default, Clone, Debug)]
pub struct BossController {
    pub fire_left: Option<Entity>,
    pub fire_right: Option<Entity>,
    pub fire_center: Option<Entity>,
    pub player: Option<Entity>,
    /// Start the pattern cycle as soon as the boss appears
    pub auto_start: bool,
}

impl BossController {
    pub fn spawn_point(&self, point: SpawnPoint) -> Option<Entity> {
        match point {
            SpawnPoint::Left => self.fire_left,
            SpawnPoint::Right => self.fire_right,
            SpawnPoint::Center => self.fire_center,
        }
    }
}

/// Templates for what the boss can spawn. `None` means "not configured"
/// and turns the matching spawn into a no-op.
#[derive(Component, Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct BossPrefabs {
    pub bullet: Option<PrefabTemplate>,
    pub bomb: Option<PrefabTemplate>,
    pub warning: Option<PrefabTemplate>,
}

impl BossPrefabs {
    pub fn projectile(&self, kind: ProjectileKind) -> Option<&PrefabTemplate> {
        match kind {
            ProjectileKind::Bullet => self.bullet.as_ref(),
            ProjectileKind::Bomb => self.bomb.as_ref(),
        }
    }
}

/// Per-boss random source for lane sampling.
#[derive(Component)]
pub struct BossRng(pub StdRng);

impl BossRng {
    /// Seeded when a seed is given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl UniformSampler for BossRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}
