//! The tile grid: static walls, the mutable pellet sets and pixel/cell geometry.

use std::collections::{BTreeSet, HashSet};

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use tracing::trace;

use crate::constants::{MapTile, CELL_SIZE, SPAWN_SEARCH_RADIUS};
use crate::error::ParseError;
use crate::map::parser::{LevelParser, ParsedLevel};

bitflags! {
    /// What was picked up from a cell by [`GridMap::consume_at`].
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Consumed: u8 {
        const PELLET = 1 << 0;
        const POWER_PELLET = 1 << 1;
    }
}

/// The maze an entity moves through.
///
/// Cells are addressed with `IVec2` where `x` is the column and `y` is the row. Pixel
/// positions use the same axes, with each cell `CELL_SIZE` pixels square.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    tiles: Vec<MapTile>,
    pellets: HashSet<IVec2>,
    power_pellets: HashSet<IVec2>,
    tunnel_rows: BTreeSet<i32>,
    player_spawn: IVec2,
}

impl GridMap {
    pub fn new(level: ParsedLevel) -> Self {
        Self {
            width: level.width as i32,
            height: level.height as i32,
            tiles: level.tiles,
            pellets: level.pellets,
            power_pellets: level.power_pellets,
            tunnel_rows: level.tunnel_rows,
            player_spawn: level.player_spawn,
        }
    }

    /// Parses a text layout straight into a grid.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        LevelParser::parse(text).map(Self::new)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The size of the whole grid, in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * CELL_SIZE
    }

    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn is_tunnel_row(&self, row: i32) -> bool {
        self.tunnel_rows.contains(&row)
    }

    /// Returns the static tile at `cell`, or `None` outside the grid.
    pub fn tile(&self, cell: IVec2) -> Option<MapTile> {
        self.in_bounds(cell)
            .then(|| self.tiles[(cell.y * self.width + cell.x) as usize])
    }

    /// Whether `cell` blocks movement.
    ///
    /// Everything outside the grid is a wall, except columns beyond either edge of a
    /// tunnel row, which stay open so entities can slide off the edge and wrap.
    pub fn is_wall(&self, cell: IVec2) -> bool {
        if cell.y >= 0 && cell.y < self.height && self.is_tunnel_row(cell.y) && (cell.x < 0 || cell.x >= self.width) {
            return false;
        }

        !matches!(self.tile(cell), Some(MapTile::Open))
    }

    /// Clamps a cell coordinate into the grid.
    pub fn clamp_cell(&self, cell: IVec2) -> IVec2 {
        cell.clamp(IVec2::ZERO, IVec2::new(self.width - 1, self.height - 1))
    }

    /// The cell containing a pixel position, clamped to the grid.
    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        self.clamp_cell((position / CELL_SIZE).floor().as_ivec2())
    }

    /// The pixel position of a cell's center.
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        cell.as_vec2() * CELL_SIZE + Vec2::splat(CELL_SIZE / 2.0)
    }

    /// Whether `position` lies within `epsilon` pixels of its cell's center.
    pub fn is_near_center(&self, position: Vec2, epsilon: f32) -> bool {
        position.distance(self.cell_center(self.cell_of(position))) <= epsilon
    }

    /// Teleports a position that has slid past either edge of a tunnel row to the center
    /// of the entry cell on the opposite side. Returns whether a wrap happened.
    pub fn wrap_if_tunnel(&self, position: &mut Vec2) -> bool {
        let row = self.cell_of(*position).y;
        if !self.is_tunnel_row(row) {
            return false;
        }

        let width = self.pixel_size().x;
        let entry = if position.x < 0.0 {
            IVec2::new(self.width - 1, row)
        } else if position.x >= width {
            IVec2::new(0, row)
        } else {
            return false;
        };

        trace!(from = ?*position, to = ?entry, "Tunnel wrap");
        *position = self.cell_center(entry);
        true
    }

    /// Removes whatever pellets sit in `cell` and reports what was there.
    pub fn consume_at(&mut self, cell: IVec2) -> Consumed {
        let mut consumed = Consumed::empty();
        if self.pellets.remove(&cell) {
            consumed |= Consumed::PELLET;
        }
        if self.power_pellets.remove(&cell) {
            consumed |= Consumed::POWER_PELLET;
        }
        consumed
    }

    pub fn has_pellet(&self, cell: IVec2) -> bool {
        self.pellets.contains(&cell)
    }

    pub fn has_power_pellet(&self, cell: IVec2) -> bool {
        self.power_pellets.contains(&cell)
    }

    pub fn pellets(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.pellets.iter().copied()
    }

    pub fn power_pellets(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.power_pellets.iter().copied()
    }

    /// Pellets and power pellets still on the board.
    pub fn remaining_pellets(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    /// All wall cells, row by row.
    pub fn walls(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
            .filter(|cell| self.tile(*cell) == Some(MapTile::Wall))
    }

    /// Whether a circle of `radius` centered at `position` fits without touching a wall.
    ///
    /// Every cell overlapped by the circle's bounding box is tested, so a circle cannot
    /// slip through the shared corner of two diagonal walls. Touching edges do not count.
    pub fn can_occupy(&self, position: Vec2, radius: f32) -> bool {
        let min = position - Vec2::splat(radius);
        let max = position + Vec2::splat(radius);
        let first = (min / CELL_SIZE).floor().as_ivec2();
        let last = (max / CELL_SIZE).floor().as_ivec2();

        for y in first.y..=last.y {
            for x in first.x..=last.x {
                let cell = IVec2::new(x, y);
                if !self.is_wall(cell) {
                    continue;
                }

                let wall_min = cell.as_vec2() * CELL_SIZE;
                let wall_max = wall_min + Vec2::splat(CELL_SIZE);
                let overlaps = min.x < wall_max.x && max.x > wall_min.x && min.y < wall_max.y && max.y > wall_min.y;
                if overlaps {
                    return false;
                }
            }
        }

        true
    }

    /// The open, in-bounds cell closest to `cell` in scan order, searching growing squares.
    pub fn find_nearby_open(&self, cell: IVec2) -> Option<IVec2> {
        let is_open = |c: IVec2| self.in_bounds(c) && !self.is_wall(c);
        if is_open(cell) {
            return Some(cell);
        }

        for distance in 1..=SPAWN_SEARCH_RADIUS {
            for dy in -distance..=distance {
                for dx in -distance..=distance {
                    let candidate = cell + IVec2::new(dx, dy);
                    if is_open(candidate) {
                        return Some(candidate);
                    }
                }
            }
        }

        None
    }
}
