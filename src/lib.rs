//! Tile-grid chase simulation: one player, four ghosts, a scatter/chase timetable and a
//! frightened window, advanced one fixed step at a time.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
