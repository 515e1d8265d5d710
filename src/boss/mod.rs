//! Boss module - attack-pattern scheduling, data loading and spawning.

mod components;
pub mod config;
pub mod data;
mod error;
pub mod host;
mod patterns;
mod plugin;
mod scheduler;
mod spawning;
mod systems;

pub use components::*;
pub use config::BossConfig;
pub use data::{BossDefinition, BossRegistry};
pub use error::BossDataError;
pub use host::{PatternContext, PatternHost, SpawnPoint, UniformSampler};
pub use patterns::{bomb_direction, fan_angles};
pub use plugin::BossPlugin;
pub use scheduler::{BossState, PatternScheduler};
pub use spawning::spawn_boss;
