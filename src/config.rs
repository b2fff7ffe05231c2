//! Runtime configuration.
//!
//! Geometry lives in [`crate::constants`]; everything here is gameplay tuning or runner
//! behaviour that may be overridden from the environment.

use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::{collider, score, speed, timing, START_LIVES};
use crate::entity::ghost::GhostSpeeds;
use crate::error::GameResult;
use crate::game::mode::{default_schedule, PhaseEntry, PhaseScheduler};

/// Prefix for environment overrides; nested keys are split on `__`, e.g. `MAZECHASE_GAME__SEED=7`.
pub const ENV_PREFIX: &str = "MAZECHASE_";

/// Gameplay tuning for a single [`crate::game::Game`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player travel speed, in pixels per second.
    pub pacman_speed: f32,
    pub pacman_snap_rate: f32,
    pub pacman_radius: f32,
    pub ghost_speed: f32,
    pub ghost_frightened_speed: f32,
    pub ghost_eyes_speed: f32,
    pub ghost_snap_rate: f32,
    pub ghost_radius: f32,
    /// Seconds a power pellet keeps the ghosts frightened.
    pub frightened_duration: f32,
    pub schedule: Vec<PhaseEntry>,
    pub lives: u32,
    /// Grace period at the start of a game, in seconds.
    pub start_safe_time: f32,
    /// Grace period after losing a life, in seconds.
    pub respawn_safe_time: f32,
    pub pellet_score: u32,
    pub power_pellet_score: u32,
    /// Points for the first ghost in a frightened window.
    pub ghost_score_base: u32,
    /// Seed for frightened wandering; `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacman_speed: speed::PACMAN,
            pacman_snap_rate: speed::PACMAN_SNAP,
            pacman_radius: collider::PACMAN_RADIUS,
            ghost_speed: speed::GHOST,
            ghost_frightened_speed: speed::GHOST_FRIGHTENED,
            ghost_eyes_speed: speed::GHOST_EYES,
            ghost_snap_rate: speed::GHOST_SNAP,
            ghost_radius: collider::GHOST_RADIUS,
            frightened_duration: timing::FRIGHTENED_DURATION,
            schedule: default_schedule(),
            lives: START_LIVES,
            start_safe_time: timing::START_SAFE_TIME,
            respawn_safe_time: timing::RESPAWN_SAFE_TIME,
            pellet_score: score::PELLET,
            power_pellet_score: score::POWER_PELLET,
            ghost_score_base: score::GHOST_BASE,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn ghost_speeds(&self) -> GhostSpeeds {
        GhostSpeeds {
            normal: self.ghost_speed,
            frightened: self.ghost_frightened_speed,
            eyes: self.ghost_eyes_speed,
        }
    }

    pub fn scheduler(&self) -> PhaseScheduler {
        PhaseScheduler::new(self.schedule.clone(), self.frightened_duration)
    }
}

/// Configuration for the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    /// Level file to load instead of the built-in maze.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_path: Option<PathBuf>,
    /// Stop after this many frames even if the game is still running.
    pub max_frames: u64,
    /// Frames between autopilot direction changes.
    pub autopilot_interval: u32,
    /// Sleep between frames to run at wall-clock speed.
    pub realtime: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            level_path: None,
            max_frames: 60 * 60 * 5,
            autopilot_interval: 45,
            realtime: false,
            log_filter: format!("warn,{}=info", env!("CARGO_CRATE_NAME")),
        }
    }
}

impl Config {
    /// Defaults merged with `MAZECHASE_*` environment overrides.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> GameResult<Config> {
        Ok(Self::figment().extract()?)
    }
}
