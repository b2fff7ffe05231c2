//! Ghost entity implementation.
//!
//! All four ghosts share one update loop: a small state machine (normal, frightened,
//! eyes), lane snapping, and a greedy direction choice at decision points. The only
//! per-ghost difference is the [`Targeting`] policy used while in the normal state.

use glam::{IVec2, Vec2};
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, trace};

use crate::constants::{CENTER_EPSILON, SPAWN_ARRIVAL_SLACK};
use crate::entity::movable::MovableEntity;
use crate::entity::targeting::{manhattan, TargetContext, Targeting};
use crate::game::mode::Phase;
use crate::map::direction::Direction;
use crate::map::grid::GridMap;

/// The four classic ghost types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GhostType {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostType {
    pub fn targeting(self) -> Targeting {
        match self {
            GhostType::Blinky => Targeting::Direct,
            GhostType::Pinky => Targeting::Ambush,
            GhostType::Inky => Targeting::Reflection,
            GhostType::Clyde => Targeting::ProximityRetreat,
        }
    }

    /// The corner this ghost heads for while scattering. Each ghost owns one quadrant.
    pub fn scatter_corner(self, map: &GridMap) -> IVec2 {
        let right = map.width() - 1;
        let bottom = map.height() - 1;
        match self {
            GhostType::Blinky => IVec2::new(right, 0),
            GhostType::Pinky => IVec2::new(0, 0),
            GhostType::Inky => IVec2::new(right, bottom),
            GhostType::Clyde => IVec2::new(0, bottom),
        }
    }
}

/// Behavioural state of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display)]
pub enum GhostState {
    #[default]
    Normal,
    /// Vulnerable while the frightened timer runs; wanders randomly.
    Frightened,
    /// Eaten; harmless and immune, racing back to its spawn.
    Eyes,
}

/// Travel speeds per state, in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSpeeds {
    pub normal: f32,
    pub frightened: f32,
    pub eyes: f32,
}

impl GhostSpeeds {
    pub fn for_state(&self, state: GhostState) -> f32 {
        match state {
            GhostState::Normal => self.normal,
            GhostState::Frightened => self.frightened,
            GhostState::Eyes => self.eyes,
        }
    }
}

/// A read-only snapshot of a ghost, handed to its peers while they decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerView {
    pub ghost_type: GhostType,
    pub position: Vec2,
    pub cell: IVec2,
    pub state: GhostState,
}

/// Per-frame inputs shared by every ghost update.
#[derive(Debug, Clone, Copy)]
pub struct GhostContext<'a> {
    pub map: &'a GridMap,
    pub player: &'a MovableEntity,
    pub peers: &'a [PeerView],
    pub phase: Phase,
    pub frightened: bool,
}

/// A ghost that hunts the player through the maze.
#[derive(Debug, Clone)]
pub struct Ghost {
    pub ghost_type: GhostType,
    pub movable: MovableEntity,
    pub state: GhostState,
    /// Center of the spawn cell; eyes return here.
    spawn: Vec2,
    corner: IVec2,
    speeds: GhostSpeeds,
    snap_rate: f32,
    /// Set by a phase switch; consumed at the next decision point.
    reverse_pending: bool,
    /// The cell whose center already produced a decision during the current visit.
    last_decision_cell: Option<IVec2>,
}

impl Ghost {
    pub fn new(ghost_type: GhostType, spawn_cell: IVec2, map: &GridMap, speeds: GhostSpeeds, radius: f32, snap_rate: f32) -> Self {
        let spawn = map.cell_center(spawn_cell);
        Self {
            ghost_type,
            movable: MovableEntity::new(spawn, Some(Direction::Left), speeds.normal, radius),
            state: GhostState::Normal,
            spawn,
            corner: ghost_type.scatter_corner(map),
            speeds,
            snap_rate,
            reverse_pending: false,
            last_decision_cell: None,
        }
    }

    /// Sends the ghost back to its spawn in the normal state, facing left.
    pub fn reset(&mut self) {
        self.movable.position = self.spawn;
        self.movable.direction = Some(Direction::Left);
        self.state = GhostState::Normal;
        self.reverse_pending = false;
        self.last_decision_cell = None;
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

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn corner(&self) -> IVec2 {
        self.corner
    }

    pub fn is_reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    pub fn current_speed(&self) -> f32 {
        self.speeds.for_state(self.state)
    }

    pub fn view(&self, map: &GridMap) -> PeerView {
        PeerView {
            ghost_type: self.ghost_type,
            position: self.movable.position,
            cell: self.movable.cell(map),
            state: self.state,
        }
    }

    /// Requests a U-turn at the next decision point. Eyes ignore it.
    pub fn force_reverse(&mut self) {
        if self.state != GhostState::Eyes {
            self.reverse_pending = true;
        }
    }

    /// Turns the ghost into eyes after the player catches it.
    pub fn mark_eaten(&mut self) {
        debug!(ghost = %self.ghost_type, "Ghost eaten, returning home as eyes");
        self.state = GhostState::Eyes;
        self.reverse_pending = false;
    }

    /// Whether the ghost is close enough to its spawn center to count as home.
    pub fn is_home(&self) -> bool {
        self.movable.position.distance(self.spawn) <= CENTER_EPSILON + SPAWN_ARRIVAL_SLACK
    }

    /// Advances the ghost by one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, ctx: &GhostContext<'_>, rng: &mut R) {
        let map = ctx.map;

        match (self.state, ctx.frightened) {
            (GhostState::Normal, true) => {
                trace!(ghost = %self.ghost_type, "Ghost frightened");
                self.state = GhostState::Frightened;
            }
            (GhostState::Frightened, false) => {
                trace!(ghost = %self.ghost_type, "Ghost recovered");
                self.state = GhostState::Normal;
            }
            _ => {}
        }

        if self.state == GhostState::Eyes && self.is_home() {
            debug!(ghost = %self.ghost_type, "Eyes reached home, reviving");
            self.state = GhostState::Normal;
            self.movable.direction = Some(Direction::Left);
            self.last_decision_cell = None;
        }

        let cell = self.movable.cell(map);
        self.movable.snap_to_lane(dt, map.cell_center(cell), self.snap_rate);

        let distance = self.current_speed() * dt;
        let at_center = self.last_decision_cell != Some(cell) && map.is_near_center(self.movable.position, CENTER_EPSILON);
        let blocked = !self.movable.can_advance(map, self.movable.direction, distance);

        if at_center || blocked {
            if at_center {
                self.last_decision_cell = Some(cell);
            }
            self.movable.direction = self.decide(cell, ctx, rng);
        }

        if !self.movable.try_advance(map, distance) {
            let fallback = self.choose_random(map, cell, true, rng);
            trace!(ghost = %self.ghost_type, ?cell, from = ?self.movable.direction, to = ?fallback, "Ghost blocked, picking a random way out");
            self.movable.direction = fallback;
            self.movable.try_advance(map, distance);
        }
    }

    /// Picks the heading to take from `cell` at a decision point.
    fn decide<R: Rng + ?Sized>(&mut self, cell: IVec2, ctx: &GhostContext<'_>, rng: &mut R) -> Option<Direction> {
        let map = ctx.map;

        if std::mem::take(&mut self.reverse_pending) {
            trace!(ghost = %self.ghost_type, "Ghost reversing for phase change");
            return self.movable.direction.map(Direction::opposite);
        }

        match self.state {
            GhostState::Eyes => self.choose_toward(map, cell, map.cell_of(self.spawn), true),
            GhostState::Frightened => self.choose_random(map, cell, true, rng),
            GhostState::Normal => {
                let target = self.ghost_type.targeting().target(
                    ctx.phase,
                    &TargetContext {
                        map,
                        player: ctx.player,
                        own_cell: cell,
                        corner: self.corner,
                        peers: ctx.peers,
                    },
                );
                trace!(ghost = %self.ghost_type, phase = %ctx.phase, ?target, "Ghost targeting");
                self.choose_toward(map, cell, target, false)
            }
        }
    }

    /// Directions leading into an open, in-bounds neighbour of `cell`, in preference order.
    /// Tunnel exits past the edge of the grid are never candidates.
    ///
    /// Unless `allow_reverse` is set, the way back is dropped when anything else is open.
    fn open_directions(&self, map: &GridMap, cell: IVec2, allow_reverse: bool) -> SmallVec<[Direction; 4]> {
        let mut options: SmallVec<[Direction; 4]> = Direction::DIRECTIONS
            .into_iter()
            .filter(|direction| {
                let neighbour = cell + direction.as_ivec2();
                map.in_bounds(neighbour) && !map.is_wall(neighbour)
            })
            .collect();

        if !allow_reverse && options.len() > 1 {
            if let Some(back) = self.movable.direction.map(Direction::opposite) {
                options.retain(|direction| *direction != back);
            }
        }

        options
    }

    /// The open direction whose neighbour cell is closest (Manhattan) to `target`.
    /// Ties go to the earliest of up, down, left, right.
    fn choose_toward(&self, map: &GridMap, cell: IVec2, target: IVec2, allow_reverse: bool) -> Option<Direction> {
        self.open_directions(map, cell, allow_reverse)
            .into_iter()
            .min_by_key(|direction| manhattan(cell + direction.as_ivec2(), target))
            .or_else(|| self.movable.direction.map(Direction::opposite))
    }

    fn choose_random<R: Rng + ?Sized>(&self, map: &GridMap, cell: IVec2, allow_reverse: bool, rng: &mut R) -> Option<Direction> {
        self.open_directions(map, cell, allow_reverse)
            .as_slice()
            .choose(rng)
            .copied()
            .or_else(|| self.movable.direction.map(Direction::opposite))
    }
}
