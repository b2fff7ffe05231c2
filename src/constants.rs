//! This module contains all the constants used in the simulation.

use std::time::Duration;

use crate::game::mode::Phase;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each cell, in pixels.
pub const CELL_SIZE: f32 = 24.0;

/// Distance (in pixels) from a cell center within which an entity counts as centered.
pub const CENTER_EPSILON: f32 = 2.0;

/// Extra slack added to [`CENTER_EPSILON`] when checking whether eyes have reached home.
pub const SPAWN_ARRIVAL_SLACK: f32 = 2.0;

/// Maximum perpendicular offset (in pixels) at which the player may pre-turn onto a crossing lane.
pub const TURN_EPSILON: f32 = 6.0;

/// How far ahead (in pixels) the player probes before committing to a direction.
pub const PROBE_DISTANCE: f32 = 2.0;

/// Overlap required before two circles count as touching.
pub const CONTACT_TOLERANCE: f32 = 2.0;

/// Manhattan distance (in cells) at which a retreating ghost gives up the chase.
pub const RETREAT_DISTANCE: i32 = 8;

/// Tiles ahead of the player that the ambushing ghost aims for.
pub const AMBUSH_LOOKAHEAD: f32 = 4.0;

/// Tiles ahead of the player used as the pivot for the reflecting ghost.
pub const REFLECTION_LOOKAHEAD: f32 = 2.0;

/// How far (in rings) the spawn search looks for an open cell.
pub const SPAWN_SEARCH_RADIUS: i32 = 7;

pub mod speed {
    //! Movement rates, in pixels per second.

    pub const PACMAN: f32 = 120.0;
    pub const GHOST: f32 = 70.0;
    pub const GHOST_FRIGHTENED: f32 = 65.0;
    pub const GHOST_EYES: f32 = 140.0;

    /// Rate at which the player is pulled onto its lane's center line.
    pub const PACMAN_SNAP: f32 = 240.0;
    /// Rate at which ghosts are pulled onto their lane's center line.
    pub const GHOST_SNAP: f32 = 260.0;
}

pub mod collider {
    pub const PACMAN_RADIUS: f32 = 9.0;
    pub const GHOST_RADIUS: f32 = 9.0;
}

pub mod score {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    /// Points for the first ghost of a frightened window; doubles with each further ghost.
    pub const GHOST_BASE: u32 = 200;
}

pub mod timing {
    use super::Phase;

    pub const FRIGHTENED_DURATION: f32 = 7.0;
    pub const START_SAFE_TIME: f32 = 5.0;
    pub const RESPAWN_SAFE_TIME: f32 = 3.0;

    /// The scatter/chase timetable. The final entry never expires.
    pub const PHASE_SCHEDULE: [(Phase, f32); 6] = [
        (Phase::Scatter, 7.0),
        (Phase::Chase, 20.0),
        (Phase::Scatter, 7.0),
        (Phase::Chase, 20.0),
        (Phase::Scatter, 5.0),
        (Phase::Chase, f32::INFINITY),
    ];
}

pub const START_LIVES: u32 = 1;

/// An enum representing the static classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    Open,
    Wall,
}

/// The built-in maze, used when no level file is supplied.
///
/// `#` wall, ` ` open, `.` pellet, `o` power pellet, `T` tunnel row, `P` player spawn.
pub const RAW_BOARD: [&str; 31] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "T     .   ########   .     T",
    "######.## ######## ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];
