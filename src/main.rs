use std::time::{Duration, Instant};

use anyhow::Context;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use thousands::Separable;
use tracing::{debug, info, warn};

use mazechase::config::Config;
use mazechase::constants::LOOP_TIME;
use mazechase::formatter;
use mazechase::game::events::GameEvent;
use mazechase::game::Game;
use mazechase::logging::setup_logging;
use mazechase::map::direction::Direction;
use mazechase::map::grid::GridMap;
use mazechase::map::parser::LevelParser;

/// Runs one game headlessly with a random autopilot at the controls.
fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    setup_logging(&config.log_filter)?;

    let mut game = match &config.level_path {
        Some(path) => {
            let level = LevelParser::load(path).with_context(|| format!("failed to load level {}", path.display()))?;
            Game::new(GridMap::new(level), config.game.clone())
        }
        None => Game::with_default_board(config.game.clone())?,
    };

    // The autopilot gets its own stream so steering does not perturb ghost wandering.
    let mut autopilot = match config.game.seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(1)),
        None => SmallRng::from_os_rng(),
    };

    info!(
        max_frames = config.max_frames,
        realtime = config.realtime,
        level = ?config.level_path,
        "Starting headless run"
    );

    let dt = LOOP_TIME.as_secs_f32();
    let started = Instant::now();
    let mut command: Option<Direction> = None;

    for frame in 0..config.max_frames {
        if config.autopilot_interval > 0 && frame % u64::from(config.autopilot_interval) == 0 {
            command = Direction::DIRECTIONS.choose(&mut autopilot).copied();
        }

        let frame_start = Instant::now();
        let events = game.tick(dt, command);
        formatter::set_tick(game.tick_count());

        for event in events {
            match event {
                GameEvent::PelletEaten { .. } => {}
                GameEvent::PlayerDied { lives_left } => warn!(lives_left, "Player died"),
                other => debug!(event = ?other, "Game event"),
            }
        }

        if game.is_over() {
            break;
        }

        if config.realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < LOOP_TIME {
                spin_sleep::sleep(LOOP_TIME - elapsed);
            }
        }
    }

    let wall_time: Duration = started.elapsed();
    let outcome = game.outcome().map_or_else(|| "unfinished".to_string(), |outcome| outcome.to_string());
    info!(%outcome, ticks = game.tick_count(), ?wall_time, "Run finished");

    println!(
        "{outcome}: score {} after {} ticks, {} pellets left, {} lives left",
        game.score().separate_with_commas(),
        game.tick_count().separate_with_commas(),
        game.remaining_pellets().separate_with_commas(),
        game.lives()
    );

    Ok(())
}
