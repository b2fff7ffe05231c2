#![allow(dead_code)]

use glam::{IVec2, Vec2};
use mazechase::config::GameConfig;
use mazechase::entity::ghost::{Ghost, GhostType};
use mazechase::map::grid::GridMap;

/// One simulation frame at 60 Hz.
pub const DT: f32 = 1.0 / 60.0;

/// A walled rectangle with an open interior and the player spawn at `spawn`.
///
/// `extra` places additional glyphs, e.g. `(IVec2::new(3, 2), '.')`.
pub fn room(width: usize, height: usize, spawn: IVec2, extra: &[(IVec2, char)]) -> String {
    let mut rows: Vec<Vec<char>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();

    rows[spawn.y as usize][spawn.x as usize] = 'P';
    for (cell, glyph) in extra {
        rows[cell.y as usize][cell.x as usize] = *glyph;
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn room_map(width: usize, height: usize, spawn: IVec2) -> GridMap {
    GridMap::parse(&room(width, height, spawn, &[])).unwrap()
}

/// Deterministic config with no grace periods.
pub fn test_config() -> GameConfig {
    GameConfig {
        seed: Some(0x5EED),
        start_safe_time: 0.0,
        respawn_safe_time: 0.0,
        ..GameConfig::default()
    }
}

pub fn ghost_at(map: &GridMap, ghost_type: GhostType, cell: IVec2) -> Ghost {
    let config = GameConfig::default();
    Ghost::new(ghost_type, cell, map, config.ghost_speeds(), config.ghost_radius, config.ghost_snap_rate)
}

/// Whether a circle sits entirely in open space, center cell included.
pub fn is_clear(map: &GridMap, position: Vec2, radius: f32) -> bool {
    !map.is_wall(map.cell_of(position)) && map.can_occupy(position, radius)
}
