use glam::IVec2;
use mazechase::config::GameConfig;
use mazechase::constants::RAW_BOARD;
use mazechase::entity::ghost::{GhostState, GhostType};
use mazechase::game::events::GameEvent;
use mazechase::game::mode::{Phase, PhaseEntry};
use mazechase::game::{ghost_spawns, Game, GameOutcome};
use mazechase::map::direction::Direction;
use mazechase::map::grid::GridMap;
use mazechase::map::parser::LevelParser;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

use common::{is_clear, room, test_config, DT};

/// Every ghost spawns on the player in this corridor.
const CORRIDOR: &str = "#######\n#P...o#\n#######";

#[test]
fn test_clearing_the_level() {
    let mut game = Game::from_level_text(
        CORRIDOR,
        GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        },
    )
    .unwrap();

    let mut events = Vec::new();
    for _ in 0..200 {
        events.extend(game.tick(DT, Some(Direction::Right)));
        if game.is_over() {
            break;
        }
    }

    assert_that(&game.outcome()).is_equal_to(Some(GameOutcome::Cleared));
    assert_that(&game.score()).is_equal_to(3 * 10 + 50);
    assert_that(&game.remaining_pellets()).is_equal_to(0);
    assert_that(&game.lives()).is_equal_to(1);

    let pellets = events.iter().filter(|e| matches!(e, GameEvent::PelletEaten { .. })).count();
    let powers = events.iter().filter(|e| matches!(e, GameEvent::PowerPelletEaten { .. })).count();
    assert_eq!((pellets, powers), (3, 1));
    assert_eq!(events.last(), Some(&GameEvent::GameOver(GameOutcome::Cleared)));

    // Finished games ignore further ticks.
    let ticks = game.tick_count();
    assert_that(&game.tick(DT, Some(Direction::Left)).is_empty()).is_true();
    assert_that(&game.tick_count()).is_equal_to(ticks);
}

#[test]
fn test_losing_every_life() {
    let mut game = Game::from_level_text(
        CORRIDOR,
        GameConfig {
            lives: 3,
            ..test_config()
        },
    )
    .unwrap();
    let spawn = game.map().cell_center(game.map().player_spawn());

    let events = game.tick(DT, None);
    assert_that(&events.contains(&GameEvent::PlayerDied { lives_left: 2 })).is_true();
    assert_that(&game.pacman().position()).is_equal_to(spawn);
    assert_that(&game.ghosts().iter().all(|ghost| ghost.direction() == Some(Direction::Left))).is_true();

    let events = game.tick(DT, None);
    assert_that(&events.contains(&GameEvent::PlayerDied { lives_left: 1 })).is_true();
    assert_that(&game.is_over()).is_false();

    let events = game.tick(DT, None);
    assert_eq!(
        events.to_vec(),
        vec![
            GameEvent::PlayerDied { lives_left: 0 },
            GameEvent::GameOver(GameOutcome::Lost),
        ]
    );
    assert_that(&game.outcome()).is_equal_to(Some(GameOutcome::Lost));
    assert_that(&game.lives()).is_equal_to(0);
}

#[test]
fn test_start_grace_period() {
    let mut game = Game::from_level_text(
        CORRIDOR,
        GameConfig {
            start_safe_time: 1.0,
            ..test_config()
        },
    )
    .unwrap();
    let ghost_positions: Vec<_> = game.ghosts().iter().map(|ghost| ghost.position()).collect();

    let mut died_at = None;
    for frame in 1..=90 {
        let events = game.tick(DT, None);
        if events.iter().any(|e| matches!(e, GameEvent::PlayerDied { .. })) {
            died_at = Some(frame);
            break;
        }
        if frame < 60 {
            assert_that(&game.is_safe()).is_true();
            let now: Vec<_> = game.ghosts().iter().map(|ghost| ghost.position()).collect();
            assert_eq!(now, ghost_positions);
        }
    }

    let frame = died_at.expect("grace period never ended");
    assert_that(&frame).is_greater_than_or_equal_to(60);
    assert_that(&frame).is_less_than_or_equal_to(62);
}

#[test]
fn test_ghost_eat_chain_scores() {
    let text = room(20, 15, IVec2::new(5, 5), &[(IVec2::new(18, 13), '.')]);
    let mut game = Game::from_level_text(&text, test_config()).unwrap();

    let far = game.map().cell_center(IVec2::new(15, 10));
    let player = game.pacman().position();
    for ghost_type in GhostType::iter() {
        let ghost = game.ghost_mut(ghost_type).unwrap();
        ghost.movable.position = if ghost_type == GhostType::Clyde { far } else { player };
    }
    game.trigger_frightened();

    let events = game.tick(DT, None);
    let points: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GhostEaten { points, .. } => Some(*points),
            _ => None,
        })
        .collect();
    assert_eq!(points, vec![200, 400, 800]);
    assert_that(&game.score()).is_equal_to(1400);
    assert_that(&game.lives()).is_equal_to(1);
    assert_that(&game.ghost(GhostType::Clyde).unwrap().state).is_equal_to(GhostState::Frightened);

    // A fresh power pellet restarts the chain.
    let player = game.pacman().position();
    game.ghost_mut(GhostType::Clyde).unwrap().movable.position = player;
    game.trigger_frightened();

    let events = game.tick(DT, None);
    let eaten: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GhostEaten { .. }))
        .collect();
    assert_that(&eaten.len()).is_equal_to(1);
    assert_that(&game.score()).is_equal_to(1600);
    assert_that(&game.ghosts().iter().all(|ghost| ghost.state == GhostState::Eyes)).is_true();
}

#[test]
fn test_power_pellet_window_ends() {
    let text = room(20, 15, IVec2::new(5, 5), &[(IVec2::new(4, 5), 'o'), (IVec2::new(18, 13), '.')]);
    // Ghosts stay frozen for the whole run so only the timer matters.
    let mut game = Game::from_level_text(
        &text,
        GameConfig {
            frightened_duration: 0.5,
            start_safe_time: 5.0,
            ..test_config()
        },
    )
    .unwrap();

    let mut events = Vec::new();
    for _ in 0..90 {
        events.extend(game.tick(DT, None));
    }

    let power_at = events.iter().position(|e| matches!(e, GameEvent::PowerPelletEaten { .. }));
    let ended_at = events.iter().position(|e| *e == GameEvent::FrightenedEnded);
    assert_that(&power_at.is_some()).is_true();
    assert_that(&ended_at.is_some()).is_true();
    assert_that(&(power_at < ended_at)).is_true();
    assert_that(&game.score()).is_equal_to(50);
}

#[test]
fn test_phase_change_event() {
    let text = room(20, 15, IVec2::new(5, 5), &[(IVec2::new(18, 13), '.')]);
    let config = GameConfig {
        schedule: vec![
            PhaseEntry {
                phase: Phase::Scatter,
                duration: 0.5,
            },
            PhaseEntry {
                phase: Phase::Chase,
                duration: f32::INFINITY,
            },
        ],
        start_safe_time: 5.0,
        ..test_config()
    };
    let mut game = Game::from_level_text(&text, config).unwrap();
    assert_that(&game.phase()).is_equal_to(Phase::Scatter);

    let mut changes = Vec::new();
    for _ in 0..60 {
        for event in game.tick(DT, None) {
            if let GameEvent::PhaseChanged(phase) = event {
                changes.push(phase);
            }
        }
    }

    assert_eq!(changes, vec![Phase::Chase]);
    assert_that(&game.phase()).is_equal_to(Phase::Chase);
    // Frozen ghosts are not told to turn around.
    assert_that(&game.ghosts().iter().any(|ghost| ghost.is_reverse_pending())).is_false();
}

/// A short scatter phase, with every ghost parked far away from the player.
fn quick_switch_game() -> Game {
    let text = room(20, 15, IVec2::new(5, 5), &[(IVec2::new(18, 13), '.')]);
    let config = GameConfig {
        schedule: vec![
            PhaseEntry {
                phase: Phase::Scatter,
                duration: 0.05,
            },
            PhaseEntry {
                phase: Phase::Chase,
                duration: f32::INFINITY,
            },
        ],
        ..test_config()
    };
    let mut game = Game::from_level_text(&text, config).unwrap();

    let parking = [IVec2::new(14, 9), IVec2::new(16, 9), IVec2::new(14, 11), IVec2::new(16, 11)];
    for (ghost_type, cell) in GhostType::iter().zip(parking) {
        let center = game.map().cell_center(cell);
        game.ghost_mut(ghost_type).unwrap().movable.position = center;
    }
    game
}

/// Ticks until the scatter phase ends, returning the headings from just before the switch.
fn tick_until_switch(game: &mut Game) -> Vec<Option<Direction>> {
    for _ in 0..30 {
        let before: Vec<_> = game.ghosts().iter().map(|ghost| ghost.direction()).collect();
        let events = game.tick(DT, None);
        if events.contains(&GameEvent::PhaseChanged(Phase::Chase)) {
            return before;
        }
    }
    panic!("phase never switched");
}

#[test]
fn test_phase_switch_reverses_ghosts() {
    let mut game = quick_switch_game();
    game.ghost_mut(GhostType::Clyde).unwrap().mark_eaten();

    let before = tick_until_switch(&mut game);

    for (ghost, heading) in game.ghosts().iter().zip(before) {
        if ghost.ghost_type == GhostType::Clyde {
            assert_that(&ghost.state).is_equal_to(GhostState::Eyes);
            assert_that(&ghost.is_reverse_pending()).is_false();
            continue;
        }
        // Either still waiting for the next decision point or already turned around.
        let reversed = ghost.direction() == heading.map(Direction::opposite);
        assert_that(&(ghost.is_reverse_pending() || reversed)).is_true();
    }
}

#[test]
fn test_phase_switch_while_frightened_does_not_reverse() {
    let mut game = quick_switch_game();
    game.trigger_frightened();

    tick_until_switch(&mut game);

    assert_that(&game.mode().is_frightened()).is_true();
    assert_that(&game.ghosts().iter().all(|ghost| ghost.state == GhostState::Frightened)).is_true();
    assert_that(&game.ghosts().iter().any(|ghost| ghost.is_reverse_pending())).is_false();
}

#[test]
fn test_spawns_are_open() {
    let levels = [
        RAW_BOARD.join("\n"),
        CORRIDOR.to_string(),
        room(20, 15, IVec2::new(1, 1), &[]),
        "#####\n#P###\n#####".to_string(),
    ];

    for text in levels {
        let map = GridMap::new(LevelParser::parse(&text).unwrap());
        assert_that(&map.is_wall(map.player_spawn())).is_false();
        for cell in ghost_spawns(&map) {
            assert_that(&map.in_bounds(cell)).is_true();
            assert_that(&map.is_wall(cell)).is_false();
        }
    }
}

#[test]
fn test_random_play_never_enters_walls() {
    let mut game = Game::with_default_board(GameConfig {
        seed: Some(42),
        lives: 1000,
        start_safe_time: 1.0,
        respawn_safe_time: 0.5,
        ..GameConfig::default()
    })
    .unwrap();
    let mut controller = SmallRng::seed_from_u64(99);
    let mut command = None;

    for frame in 0..4000 {
        if frame % 30 == 0 {
            command = Direction::DIRECTIONS.choose(&mut controller).copied();
        }
        game.tick(DT, command);

        let pacman = game.pacman();
        assert_that(&is_clear(game.map(), pacman.position(), pacman.radius())).is_true();
        for ghost in game.ghosts().iter() {
            assert_that(&is_clear(game.map(), ghost.position(), ghost.radius())).is_true();
        }

        if game.is_over() {
            break;
        }
    }

    assert_that(&game.tick_count()).is_greater_than(0);
}
