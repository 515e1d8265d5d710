//! Projectile-related components.

use bevy::prelude::*;
use serde::Deserialize;

/// What a projectile was fired as.
///
/// Bullets and bombs fly the same way; the kind picks the template and is
/// passed along with contact events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    Bullet,
    Bomb,
}

/// Everything needed to put one projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub kind: ProjectileKind,
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
    pub speed: f32,
    /// Seconds before the projectile expires
    pub lifetime: f32,
}

/// How a spawned projectile or marker looks to the physics world.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PrefabTemplate {
    /// Uniform transform scale
    pub scale: f32,
    /// Sensor radius before scaling
    pub collider_radius: f32,
}

impl Default for PrefabTemplate {
    fn default() -> Self {
        Self {
            scale: 1.0,
            collider_radius: 0.25,
        }
    }
}

/// Straight-line mover that expires after a fixed lifetime.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Unit direction of travel
    pub direction: Vec3,
    pub speed: f32,
    /// Seconds to live
    pub lifetime: f32,
    /// Seconds alive so far
    pub elapsed: f32,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, direction: Vec3, speed: f32, lifetime: f32) -> Self {
        Self {
            kind,
            direction: direction.normalize_or_zero(),
            speed,
            lifetime,
            elapsed: 0.0,
        }
    }

    pub fn from_launch(launch: &ProjectileLaunch) -> Self {
        Self::new(launch.kind, launch.direction, launch.speed, launch.lifetime)
    }

    /// Age by `delta` seconds and return how far the projectile moved.
    pub fn advance(&mut self, delta: f32) -> Vec3 {
        self.elapsed += delta;
        self.direction * self.speed * delta
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }
}

/// Warning marker for one bombardment lane.
#[derive(Component, Debug, Clone, Copy)]
pub struct TelegraphMarker {
    /// Boss whose bombardment placed the marker
    pub owner: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_direction() {
        let projectile = Projectile::new(ProjectileKind::Bullet, Vec3::new(3.0, 0.0, 4.0), 1.0, 1.0);
        assert!((projectile.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn expires_on_first_tick_past_lifetime() {
        let mut projectile = Projectile::new(ProjectileKind::Bomb, Vec3::NEG_Z, 10.0, 1.0);
        let mut travelled = Vec3::ZERO;
        let mut ticks = 0;

        while !projectile.is_expired() {
            travelled += projectile.advance(0.3);
            ticks += 1;
        }

        // 0.3, 0.6, 0.9 alive; 1.2 is the first tick at or past 1.0
        assert_eq!(ticks, 4);
        assert!((projectile.elapsed - 1.2).abs() < 1e-5);
        // Distance covers the overshoot, not just speed * lifetime
        assert!((travelled.length() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn zero_lifetime_expires_after_one_tick() {
        let mut projectile = Projectile::new(ProjectileKind::Bullet, Vec3::X, 5.0, 0.0);
        assert!(projectile.is_expired());
        let moved = projectile.advance(0.1);
        assert!((moved - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }
}
