// talos_sim/src/config.rs

//! World-file configuration.
//!
//! A world file is TOML. Every key of the `[position]` table is optional;
//! absent keys leave the model's in-memory value untouched, so a partial
//! file never resets previously configured state.

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use talos_core::localization::DriftMaxima;
use talos_core::types::Pose;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load world file: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Top level of a world file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub position: PositionConfig,
}

impl WorldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Figment::new()
            .merge(Toml::file(path.as_ref()))
            .extract()
            .map_err(Box::new)?)
    }

    /// Parse from an in-memory TOML string. Used by tests.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(Figment::new()
            .merge(Toml::string(s))
            .extract()
            .map_err(Box::new)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fixed simulation step, in seconds.
    pub step_interval: f64,
    /// Optional seed for the simulation RNG, for determinism.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_interval: 0.1,
            seed: None,
        }
    }
}

/// The `[position]` table of a world file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    /// `"diff"` or `"omni"`. Anything else warns and keeps the previous mode.
    pub drive: Option<String>,

    /// `"gps"` or `"odom"`. Anything else warns and keeps the previous mode.
    pub localization: Option<String>,

    /// Origin of the localization coordinate system, `[x, y, a]`. Defaults
    /// to the model's starting pose; setting it rebases the believed pose
    /// and assumes exact knowledge at that instant.
    ///
    /// Tuples are whole or absent: a short tuple is a load error, not a
    /// per-element fallback to the in-memory value.
    pub localization_origin: Option<Pose>,

    /// Per-axis maximum drift proportion, `[ex, ey, ea]`. The actual drift
    /// coefficients are resampled from these bounds. Whole or absent, like
    /// `localization_origin`.
    pub odom_error: Option<DriftMaxima>,

    /// Body bounding size `[sx, sy]`, consumed read-only by the renderer.
    pub geometry: Option<[f64; 2]>,

    /// Removed long ago; its presence only produces a warning. Use
    /// `localization_origin` instead.
    pub odom: Option<toml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_world_file_parses() {
        let world = WorldConfig::from_toml_str(
            r#"
            [simulation]
            step_interval = 0.05
            seed = 42

            [position]
            drive = "omni"
            localization = "odom"
            localization_origin = [1.0, 2.0, 0.5]
            odom_error = [0.01, 0.01, 0.02]
            geometry = [0.44, 0.38]
            "#,
        )
        .unwrap();

        assert_eq!(world.simulation.step_interval, 0.05);
        assert_eq!(world.simulation.seed, Some(42));
        let p = world.position;
        assert_eq!(p.drive.as_deref(), Some("omni"));
        assert_eq!(p.localization.as_deref(), Some("odom"));
        assert_eq!(p.localization_origin, Some(Pose::new(1.0, 2.0, 0.5)));
        assert_eq!(p.odom_error, Some(DriftMaxima::from([0.01, 0.01, 0.02])));
        assert_eq!(p.geometry, Some([0.44, 0.38]));
        assert!(p.odom.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let world = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(world.simulation.step_interval, 0.1);
        assert!(world.position.drive.is_none());
        assert!(world.position.localization_origin.is_none());
    }

    #[test]
    fn deprecated_odom_key_still_parses() {
        let world = WorldConfig::from_toml_str("[position]\nodom = [0.0, 0.0, 0.0]\n").unwrap();
        assert!(world.position.odom.is_some());
    }

    #[test]
    fn short_tuples_are_load_errors() {
        assert!(
            WorldConfig::from_toml_str("[position]\nlocalization_origin = [1.0, 2.0]\n").is_err()
        );
        assert!(WorldConfig::from_toml_str("[position]\nodom_error = [0.01]\n").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(WorldConfig::from_toml_str("[position]\ndirve = \"diff\"\n").is_err());
    }
}
