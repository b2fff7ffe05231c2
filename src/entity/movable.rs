//! Shared position and movement state for the player and the ghosts.

use glam::{IVec2, Vec2};

use crate::map::direction::{heading_vec2, Direction};
use crate::map::grid::GridMap;

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// A circle that moves through the maze along one of the four axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovableEntity {
    /// Center of the entity, in pixels.
    pub position: Vec2,
    /// Current heading; `None` while stationary.
    pub direction: Option<Direction>,
    /// Base travel speed, in pixels per second.
    pub speed: f32,
    /// Collision radius, in pixels.
    pub radius: f32,
}

impl MovableEntity {
    pub fn new(position: Vec2, direction: Option<Direction>, speed: f32, radius: f32) -> Self {
        Self {
            position,
            direction,
            speed,
            radius,
        }
    }

    /// The cell the entity's center currently sits in.
    pub fn cell(&self, map: &GridMap) -> IVec2 {
        map.cell_of(self.position)
    }

    /// Lane snapping: pulls the coordinate perpendicular to the heading toward `center`
    /// at `snap_rate` pixels per second. Stationary entities are left alone.
    pub fn snap_to_lane(&mut self, dt: f32, center: Vec2, snap_rate: f32) {
        let max_delta = snap_rate * dt;
        match self.direction {
            Some(direction) if direction.is_horizontal() => {
                self.position.y = approach(self.position.y, center.y, max_delta);
            }
            Some(_) => {
                self.position.x = approach(self.position.x, center.x, max_delta);
            }
            None => {}
        }
    }

    /// Where the entity would end up after travelling `distance` pixels along `direction`,
    /// tunnel wraparound included.
    pub fn projected(&self, map: &GridMap, direction: Option<Direction>, distance: f32) -> Vec2 {
        let mut next = self.position + heading_vec2(direction) * distance;
        map.wrap_if_tunnel(&mut next);
        next
    }

    /// Whether travelling `distance` pixels along `direction` keeps the entity clear of walls.
    pub fn can_advance(&self, map: &GridMap, direction: Option<Direction>, distance: f32) -> bool {
        map.can_occupy(self.projected(map, direction, distance), self.radius)
    }

    /// Advances along the current heading if the destination is clear.
    ///
    /// Returns `false` (leaving the entity in place) when blocked.
    pub fn try_advance(&mut self, map: &GridMap, distance: f32) -> bool {
        let next = self.projected(map, self.direction, distance);
        if map.can_occupy(next, self.radius) {
            self.position = next;
            true
        } else {
            false
        }
    }
}
