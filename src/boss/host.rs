//! Collaborator interfaces the pattern scheduler talks to.
//!
//! The scheduler never touches the ECS directly. Everything it needs from
//! the outside world (where to fire from, where the player is, how to put
//! a projectile or marker into the scene) goes through [`PatternHost`], and
//! all randomness goes through [`UniformSampler`]. Tests swap both for
//! recording / scripted versions.

use bevy::prelude::*;

use crate::projectiles::{ProjectileKind, ProjectileLaunch};

/// Named fire origins on the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnPoint {
    Left,
    Right,
    Center,
}

/// Scene-side operations used by the patterns.
///
/// Spawning returns `None` when no template is configured for what was
/// asked, and the pattern carries on as if it had fired.
pub trait PatternHost {
    /// Current world position of a fire origin, if it is wired up.
    fn spawn_point(&self, point: SpawnPoint) -> Option<Vec3>;

    /// Current position of the tracked target.
    fn player_position(&self) -> Option<Vec3>;

    fn spawn_projectile(&mut self, launch: ProjectileLaunch) -> Option<Entity>;

    /// Create a telegraph marker at `position`.
    fn spawn_marker(&mut self, position: Vec3) -> Option<Entity>;

    /// Release an entity created by this host. Unknown or already released
    /// entities are ignored.
    fn despawn(&mut self, entity: Entity);
}

/// Uniform float sampler.
pub trait UniformSampler {
    /// A value in `[min, max]`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// The collaborators for one scheduler tick.
pub struct PatternContext<'a> {
    pub host: &'a mut dyn PatternHost,
    pub sampler: &'a mut dyn UniformSampler,
}

impl<'a> PatternContext<'a> {
    pub fn new(host: &'a mut dyn PatternHost, sampler: &'a mut dyn UniformSampler) -> Self {
        Self { host, sampler }
    }

    /// Fire one projectile of `kind`. Direction is normalized here, and a
    /// zero direction or missing template means nothing is fired.
    pub fn fire(
        &mut self,
        kind: ProjectileKind,
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        lifetime: f32,
    ) -> Option<Entity> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            debug!("Skipping {:?} with zero direction", kind);
            return None;
        }

        let spawned = self.host.spawn_projectile(ProjectileLaunch {
            kind,
            origin,
            direction,
            speed,
            lifetime,
        });

        if spawned.is_none() {
            debug!("No {:?} template configured, shot skipped", kind);
        }
        spawned
    }

    /// Fire from a named spawn point, skipping silently if it is not wired.
    pub fn fire_from(
        &mut self,
        point: SpawnPoint,
        kind: ProjectileKind,
        direction: Vec3,
        speed: f32,
        lifetime: f32,
    ) -> Option<Entity> {
        let Some(origin) = self.host.spawn_point(point) else {
            debug!("Spawn point {:?} is not wired, shot skipped", point);
            return None;
        };
        self.fire(kind, origin, direction, speed, lifetime)
    }
}
