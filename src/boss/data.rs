//! Boss data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::components::BossPrefabs;
use super::config::BossConfig;
use super::error::BossDataError;

/// Directory boss definitions are read from.
pub const BOSS_DATA_DIR: &str = "assets/data/bosses";

/// Local offsets of the fire origins, relative to the boss.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct SpawnPointOffsets {
    pub left: Option<(f32, f32, f32)>,
    pub right: Option<(f32, f32, f32)>,
    pub center: Option<(f32, f32, f32)>,
}

/// Boss definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BossDefinition {
    pub name: String,
    pub spawn_position: (f32, f32, f32),
    pub spawn_points: SpawnPointOffsets,
    pub prefabs: BossPrefabs,
    /// Fixed seed for lane sampling; entropy when absent
    pub rng_seed: Option<u64>,
    pub auto_start: bool,
    pub patterns: BossConfig,
}

impl Default for BossDefinition {
    fn default() -> Self {
        Self {
            name: "Boss".to_string(),
            spawn_position: (0.0, 0.0, 0.0),
            spawn_points: SpawnPointOffsets::default(),
            prefabs: BossPrefabs::default(),
            rng_seed: None,
            auto_start: true,
            patterns: BossConfig::default(),
        }
    }
}

impl BossDefinition {
    /// Parse and validate a definition. `origin` is only used in errors.
    pub fn from_ron(contents: &str, origin: &str) -> Result<Self, BossDataError> {
        let definition: BossDefinition =
            ron::from_str(contents).map_err(|e| BossDataError::ParseError {
                path: origin.to_string(),
                details: e.to_string(),
            })?;
        definition.patterns.validate()?;
        Ok(definition)
    }

    /// Read, parse and validate a definition file.
    pub fn load(path: &Path) -> Result<Self, BossDataError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BossDataError::FileNotFound(display.clone()),
            _ => BossDataError::ReadError {
                path: display.clone(),
                details: e.to_string(),
            },
        })?;
        Self::from_ron(&contents, &display)
    }
}

/// Resource holding all loaded boss definitions.
#[derive(Resource, Default)]
pub struct BossRegistry {
    pub definitions: HashMap<String, BossDefinition>,
}

impl BossRegistry {
    /// Get a boss definition by file stem.
    pub fn get(&self, boss_type: &str) -> Option<&BossDefinition> {
        self.definitions.get(boss_type)
    }
}

/// Load all boss definitions from the assets/data/bosses/ directory.
pub fn load_boss_definitions(mut registry: ResMut<BossRegistry>) {
    let bosses_dir = Path::new(BOSS_DATA_DIR);

    if !bosses_dir.exists() {
        warn!("Boss definitions directory not found: {:?}", bosses_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(bosses_dir) else {
        warn!("Failed to read boss definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let boss_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match BossDefinition::load(&path) {
                Ok(definition) => {
                    info!("Loaded boss definition: {} ({})", definition.name, boss_type);
                    registry.definitions.insert(boss_type, definition);
                }
                Err(e) => {
                    error!("Skipping boss definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} boss definitions", registry.definitions.len());
}
