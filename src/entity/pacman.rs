//! The player-controlled entity.
//!
//! Pac-Man keeps a buffered "next direction" from the command source and takes it as soon
//! as the maze allows. Turns are tolerant: a turn onto a vertical lane only requires the
//! horizontal offset from the column center to be small (and vice versa), so the player
//! does not have to be pixel-aligned to corner.

use glam::{IVec2, Vec2};
use tracing::trace;

use crate::constants::{CENTER_EPSILON, PROBE_DISTANCE, TURN_EPSILON};
use crate::entity::movable::MovableEntity;
use crate::map::direction::Direction;
use crate::map::grid::GridMap;

/// The player entity.
#[derive(Debug, Clone)]
pub struct Pacman {
    pub movable: MovableEntity,
    /// The direction most recently requested by the command source.
    pub next_direction: Option<Direction>,
    snap_rate: f32,
}

impl Pacman {
    pub fn new(spawn: Vec2, speed: f32, radius: f32, snap_rate: f32) -> Self {
        Self {
            movable: MovableEntity::new(spawn, Some(Direction::Left), speed, radius),
            next_direction: Some(Direction::Left),
            snap_rate,
        }
    }

    /// Puts the player back on `spawn`, facing left.
    pub fn reset(&mut self, spawn: Vec2) {
        self.movable.position = spawn;
        self.movable.direction = Some(Direction::Left);
        self.next_direction = Some(Direction::Left);
    }

    pub fn position(&self) -> Vec2 {
        self.movable.position
    }

    pub fn direction(&self) -> Option<Direction> {
        self.movable.direction
    }

    pub fn radius(&self) -> f32 {
        self.movable.radius
    }

    pub fn cell(&self, map: &GridMap) -> IVec2 {
        self.movable.cell(map)
    }

    /// Buffers a direction to take at the next opportunity.
    pub fn set_next_direction(&mut self, direction: Direction) {
        self.next_direction = Some(direction);
    }

    /// Advances the player by one frame.
    ///
    /// Blocked movement is not an error: the player simply stays put until a later turn
    /// opens a path.
    pub fn update(&mut self, dt: f32, map: &GridMap) {
        let center = map.cell_center(self.cell(map));

        self.movable.snap_to_lane(dt, center, self.snap_rate);

        if let Some(wanted) = self.next_direction {
            let aligned = Self::can_pre_turn(wanted, self.movable.position, center)
                || map.is_near_center(self.movable.position, CENTER_EPSILON);
            if aligned && self.movable.direction != Some(wanted) && self.can_take(map, wanted) {
                trace!(from = ?self.movable.direction, to = %wanted, "Player turned");
                self.movable.direction = Some(wanted);
            }
        }

        if let Some(direction) = self.movable.direction {
            if self.can_take(map, direction) {
                self.movable.try_advance(map, self.movable.speed * dt);
            }
        }
    }

    /// Tolerant pre-alignment: only the axis crossed by the turn has to be near the center line.
    fn can_pre_turn(wanted: Direction, position: Vec2, center: Vec2) -> bool {
        if wanted.is_vertical() {
            (position.x - center.x).abs() <= TURN_EPSILON
        } else {
            (position.y - center.y).abs() <= TURN_EPSILON
        }
    }

    /// Probes a couple of pixels along `direction` for walls.
    fn can_take(&self, map: &GridMap, direction: Direction) -> bool {
        map.can_occupy(self.movable.position + direction.as_vec2() * PROBE_DISTANCE, self.movable.radius)
    }
}
