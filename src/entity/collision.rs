use glam::Vec2;
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::CONTACT_TOLERANCE;
use crate::entity::ghost::{Ghost, GhostState, GhostType};
use crate::entity::movable::MovableEntity;

/// Checks if two circles overlap, allowing a small grace distance before they count as touching.
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) <= a_radius + b_radius - CONTACT_TOLERANCE
}

/// What happened when the player met the ghosts this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// The player touched a dangerous ghost.
    pub player_died: bool,
    /// Ghosts eaten this frame, in ghost order.
    pub eaten: SmallVec<[GhostType; 4]>,
}

impl CollisionOutcome {
    pub fn eaten_count(&self) -> usize {
        self.eaten.len()
    }
}

/// Resolves player/ghost contact for one frame.
///
/// While `frightened` is set, every non-eyes ghost in contact is eaten (turned into eyes).
/// Otherwise the first non-eyes ghost in contact kills the player and the scan stops.
/// Eyes never interact with the player.
pub fn resolve_collisions(player: &MovableEntity, ghosts: &mut [Ghost], frightened: bool) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for ghost in ghosts.iter_mut() {
        if ghost.state == GhostState::Eyes {
            continue;
        }
        if !circles_touch(player.position, player.radius, ghost.position(), ghost.radius()) {
            continue;
        }

        if frightened {
            ghost.mark_eaten();
            outcome.eaten.push(ghost.ghost_type);
        } else {
            debug!(ghost = %ghost.ghost_type, position = ?ghost.position(), "Player caught");
            outcome.player_died = true;
            break;
        }
    }

    outcome
}
