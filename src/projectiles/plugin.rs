//! Projectile plugin - motion, expiry and contact forwarding.

use bevy::prelude::*;

use super::systems;
use crate::core::GameState;

/// Projectile plugin - advances projectiles and reports their contacts.
///
/// Expects the Rapier physics plugin to be present, since contacts are
/// read from its collision events.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                systems::advance_projectiles,
                systems::forward_projectile_contacts,
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
