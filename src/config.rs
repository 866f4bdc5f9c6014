//! Game tuning and startup configuration
//!
//! Every gameplay constant lives in [`GameConfig`] so tests and players can
//! pin behaviour (seed, dive odds) without touching the simulation code.

use color_eyre::{
    Result,
    eyre::{WrapErr, ensure},
};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "CUBE_SWARM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Enemy grid ===
    pub cols: usize,
    pub initial_rows: usize,
    pub spacing_x: f32,
    pub spacing_y: f32,
    /// Height of the lowest grid row at spawn
    pub grid_base_y: f32,
    pub grid_z: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,

    // === Difficulty ===
    pub initial_enemy_speed: f32,
    pub enemy_speed_increment: f32,
    /// March direction flips once any enemy passes +/- this x
    pub march_edge: f32,
    pub dive_chance_base: f64,
    pub dive_chance_per_level: f64,
    pub max_descending: usize,

    // === Descending enemies ===
    pub dive_speed: f32,
    pub dive_amplitude_min: f32,
    pub dive_amplitude_max: f32,
    /// Advance of the shared sine clock per tick
    pub clock_step: f32,
    pub volley_trigger_y: f32,
    pub volley_spread: f32,
    pub enemy_bullet_speed: f32,
    /// Anything below this height has left the playfield
    pub exit_y: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_half_extent: f32,
    pub player_min_x: f32,
    pub player_max_x: f32,
    pub player_min_y: f32,
    pub player_max_y: f32,
    pub player_floor_y: f32,
    pub player_z: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_ceiling: f32,
    pub points_per_kill: u32,

    // === Timing ===
    pub appearance_interval_ms: u64,
    pub frame_interval_ms: u64,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,

    // === Audio ===
    pub shot_volume: f32,
    pub collision_volume: f32,
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 6,
            initial_rows: 3,
            spacing_x: 3.0,
            spacing_y: 2.0,
            grid_base_y: 2.0,
            grid_z: -20.0,
            enemy_width: 1.5,
            enemy_height: 1.0,

            initial_enemy_speed: 0.1,
            enemy_speed_increment: 0.05,
            march_edge: 9.0,
            dive_chance_base: 0.01,
            dive_chance_per_level: 0.005,
            max_descending: 2,

            dive_speed: 0.1,
            dive_amplitude_min: 0.1,
            dive_amplitude_max: 0.2,
            clock_step: 0.03,
            volley_trigger_y: 2.0,
            volley_spread: 0.1,
            enemy_bullet_speed: 0.4,
            exit_y: -10.5,

            player_speed: 0.5,
            player_half_extent: 0.5,
            player_min_x: -10.0,
            player_max_x: 10.0,
            player_min_y: -15.0,
            player_max_y: -5.0,
            player_floor_y: -10.0,
            player_z: -15.0,
            player_bullet_speed: 0.3,
            player_bullet_ceiling: 10.0,
            points_per_kill: 10,

            appearance_interval_ms: 500,
            frame_interval_ms: 16,
            seed: None,

            shot_volume: 0.7,
            collision_volume: 0.7,
            music_volume: 0.5,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid game config JSON")?;
        config.validated()
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validated()
            .wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// An empty grid would count as cleared on every tick
    fn validated(self) -> Result<Self> {
        ensure!(self.cols > 0, "cols must be at least 1");
        ensure!(self.initial_rows > 0, "initial_rows must be at least 1");
        Ok(self)
    }

    /// Resolve the config from `CUBE_SWARM_CONFIG` or the first positional
    /// CLI argument
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| config_path_arg(std::env::args_os().skip(1)));

        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn appearance_interval(&self) -> Duration {
        Duration::from_millis(self.appearance_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// First argument that is not a flag
fn config_path_arg(args: impl IntoIterator<Item = OsString>) -> Option<PathBuf> {
    args.into_iter()
        .next()
        .filter(|arg| !arg.to_string_lossy().starts_with('-'))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 6);
        assert_eq!(config.initial_rows, 3);
        assert_eq!(config.initial_enemy_speed, 0.1);
        assert_eq!(config.max_descending, 2);
        assert_eq!(config.appearance_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "cols": 8, "seed": 42 }"#).unwrap();
        assert_eq!(config.cols, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.initial_rows, 3);
        assert_eq!(config.player_speed, 0.5);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GameConfig::from_json("{ cols: }").is_err());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = GameConfig::load("definitely/not/here.json").unwrap_err();
        assert!(format!("{err}").contains("definitely/not/here.json"));
    }

    #[test]
    fn test_empty_grid_is_rejected() {
        let err = GameConfig::from_json(r#"{ "cols": 0 }"#).unwrap_err();
        assert!(format!("{err}").contains("cols"));
        assert!(GameConfig::from_json(r#"{ "initial_rows": 0 }"#).is_err());
    }

    #[test]
    fn test_flags_are_not_config_paths() {
        let args = |list: &[&str]| list.iter().map(OsString::from).collect::<Vec<_>>();
        assert_eq!(config_path_arg(args(&["--help"])), None);
        assert_eq!(config_path_arg(args(&[])), None);
        assert_eq!(
            config_path_arg(args(&["tuning.json"])),
            Some(PathBuf::from("tuning.json"))
        );
    }
}
