//! This module contains the main game logic and state.

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::RAW_BOARD;
use crate::entity::collision::resolve_collisions;
use crate::entity::ghost::{Ghost, GhostContext, GhostType, PeerView};
use crate::entity::pacman::Pacman;
use crate::error::GameResult;
use crate::map::direction::Direction;
use crate::map::grid::{Consumed, GridMap};
use crate::map::parser::LevelParser;

use self::events::GameEvent;
use self::mode::{Phase, PhaseScheduler};

pub mod events;
pub mod mode;

/// Events produced by a single tick. Most frames produce at most a couple.
pub type FrameEvents = SmallVec<[GameEvent; 8]>;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum GameOutcome {
    /// Every pellet and power pellet was eaten.
    Cleared,
    /// The player ran out of lives.
    Lost,
}

/// The `Game` struct is the main entry point for the simulation.
///
/// It owns the maze, the player, the ghosts and the phase scheduler, and advances all
/// of them in a fixed order once per [`Game::tick`]. Nothing here is global, so any
/// number of games can run side by side.
pub struct Game {
    map: GridMap,
    pacman: Pacman,
    ghosts: SmallVec<[Ghost; 4]>,
    mode: PhaseScheduler,
    score: u32,
    lives: u32,
    /// Seconds of grace left, during which ghosts are frozen and harmless.
    safe_remaining: f32,
    outcome: Option<GameOutcome>,
    rng: SmallRng,
    config: GameConfig,
    tick_count: u64,
}

impl Game {
    pub fn new(map: GridMap, config: GameConfig) -> Self {
        let pacman = Pacman::new(
            map.cell_center(map.player_spawn()),
            config.pacman_speed,
            config.pacman_radius,
            config.pacman_snap_rate,
        );

        let ghosts: SmallVec<[Ghost; 4]> = GhostType::iter()
            .zip(ghost_spawns(&map))
            .map(|(ghost_type, cell)| {
                Ghost::new(
                    ghost_type,
                    cell,
                    &map,
                    config.ghost_speeds(),
                    config.ghost_radius,
                    config.ghost_snap_rate,
                )
            })
            .collect();

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(
            width = map.width(),
            height = map.height(),
            pellets = map.remaining_pellets(),
            seed = ?config.seed,
            "Game created"
        );

        Self {
            mode: config.scheduler(),
            score: 0,
            lives: config.lives,
            safe_remaining: config.start_safe_time,
            outcome: None,
            map,
            pacman,
            ghosts,
            rng,
            config,
            tick_count: 0,
        }
    }

    /// Builds a game from a text level layout.
    pub fn from_level_text(text: &str, config: GameConfig) -> GameResult<Self> {
        let level = LevelParser::parse(text)?;
        Ok(Self::new(GridMap::new(level), config))
    }

    /// Builds a game on the built-in maze.
    pub fn with_default_board(config: GameConfig) -> GameResult<Self> {
        let level = LevelParser::parse_rows(&RAW_BOARD)?;
        Ok(Self::new(GridMap::new(level), config))
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `command` is the direction requested by the controller this frame, if any. Once the
    /// game is over this does nothing and returns no events.
    pub fn tick(&mut self, dt: f32, command: Option<Direction>) -> FrameEvents {
        let mut events = FrameEvents::new();
        if self.outcome.is_some() {
            return events;
        }

        self.tick_count += 1;
        let safe = self.safe_remaining > 0.0;
        if safe {
            self.safe_remaining = (self.safe_remaining - dt).max(0.0);
        }

        let mode = self.mode.advance(dt);
        if mode.phase_switched {
            events.push(GameEvent::PhaseChanged(mode.phase));
            if !mode.frightened && !safe {
                for ghost in self.ghosts.iter_mut() {
                    ghost.force_reverse();
                }
            }
        }
        if mode.frightened_ended {
            events.push(GameEvent::FrightenedEnded);
        }

        if let Some(direction) = command {
            self.pacman.set_next_direction(direction);
        }
        self.pacman.update(dt, &self.map);

        self.consume_pellets(&mut events);

        if !safe {
            self.update_ghosts(dt);
            self.resolve_contacts(&mut events);
        }

        if self.outcome.is_none() && self.map.remaining_pellets() == 0 {
            self.finish(GameOutcome::Cleared, &mut events);
        }

        events
    }

    fn consume_pellets(&mut self, events: &mut FrameEvents) {
        let cell = self.pacman.cell(&self.map);
        let consumed = self.map.consume_at(cell);

        if consumed.contains(Consumed::PELLET) {
            self.score += self.config.pellet_score;
            trace!(?cell, score = self.score, "Pellet eaten");
            events.push(GameEvent::PelletEaten { cell });
        }
        if consumed.contains(Consumed::POWER_PELLET) {
            self.score += self.config.power_pellet_score;
            debug!(?cell, score = self.score, "Power pellet eaten");
            self.mode.trigger_frightened();
            events.push(GameEvent::PowerPelletEaten { cell });
        }
    }

    fn update_ghosts(&mut self, dt: f32) {
        let phase = self.mode.phase();
        let frightened = self.mode.is_frightened();

        for index in 0..self.ghosts.len() {
            let peers: SmallVec<[PeerView; 4]> = self.ghosts.iter().map(|ghost| ghost.view(&self.map)).collect();
            let ctx = GhostContext {
                map: &self.map,
                player: &self.pacman.movable,
                peers: &peers,
                phase,
                frightened,
            };
            self.ghosts[index].update(dt, &ctx, &mut self.rng);
        }
    }

    fn resolve_contacts(&mut self, events: &mut FrameEvents) {
        let outcome = resolve_collisions(&self.pacman.movable, &mut self.ghosts, self.mode.is_frightened());

        for ghost in outcome.eaten {
            let points = self.mode.award_ghost(self.config.ghost_score_base);
            self.score += points;
            debug!(%ghost, points, score = self.score, "Ghost eaten");
            events.push(GameEvent::GhostEaten { ghost, points });
        }

        if outcome.player_died {
            self.lose_life(events);
        }
    }

    fn lose_life(&mut self, events: &mut FrameEvents) {
        self.lives = self.lives.saturating_sub(1);
        info!(lives = self.lives, score = self.score, "Player died");
        events.push(GameEvent::PlayerDied { lives_left: self.lives });

        if self.lives == 0 {
            self.finish(GameOutcome::Lost, events);
            return;
        }

        self.reset_positions();
        self.mode.clear_frightened();
        self.safe_remaining = self.config.respawn_safe_time;
    }

    /// Puts the player and every ghost back on their spawns.
    pub fn reset_positions(&mut self) {
        self.pacman.reset(self.map.cell_center(self.map.player_spawn()));
        for ghost in self.ghosts.iter_mut() {
            ghost.reset();
        }
    }

    fn finish(&mut self, outcome: GameOutcome, events: &mut FrameEvents) {
        info!(%outcome, score = self.score, ticks = self.tick_count, "Game over");
        self.outcome = Some(outcome);
        events.push(GameEvent::GameOver(outcome));
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    /// Every ghost, in [`GhostType`] order.
    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn mode(&self) -> &PhaseScheduler {
        &self.mode
    }

    /// Mutable access to one ghost, for scripted setups such as replays and tests.
    pub fn ghost_mut(&mut self, ghost_type: GhostType) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|ghost| ghost.ghost_type == ghost_type)
    }

    /// Starts (or restarts) the frightened window as if a power pellet had been eaten,
    /// without scoring anything.
    pub fn trigger_frightened(&mut self) {
        debug!("Frightened window triggered");
        self.mode.trigger_frightened();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn remaining_pellets(&self) -> usize {
        self.map.remaining_pellets()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_safe(&self) -> bool {
        self.safe_remaining > 0.0
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn phase(&self) -> Phase {
        self.mode.phase()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ghost(&self, ghost_type: GhostType) -> Option<&Ghost> {
        self.ghosts.iter().find(|ghost| ghost.ghost_type == ghost_type)
    }
}

/// Spawn cells for the four ghosts, in [`GhostType`] order.
///
/// Each ghost takes the open cell nearest to one neighbour of the player spawn (up, left,
/// right, down), or the player spawn itself when nothing is open nearby.
pub fn ghost_spawns(map: &GridMap) -> [IVec2; 4] {
    let origin = map.player_spawn();
    [Direction::Up, Direction::Left, Direction::Right, Direction::Down]
        .map(|direction| map.find_nearby_open(origin + direction.as_ivec2()).unwrap_or(origin))
}
