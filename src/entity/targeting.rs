//! Target selection policies, one per ghost personality.
//!
//! Every policy answers the same question, "which cell should I steer toward?", so the
//! ghost update loop dispatches on a plain enum instead of a type per ghost.

use glam::IVec2;
use strum_macros::{AsRefStr, Display};

use crate::constants::{AMBUSH_LOOKAHEAD, CELL_SIZE, REFLECTION_LOOKAHEAD, RETREAT_DISTANCE};
use crate::entity::ghost::PeerView;
use crate::entity::movable::MovableEntity;
use crate::game::mode::Phase;
use crate::map::direction::heading_vec2;
use crate::map::grid::GridMap;

/// Manhattan distance between two cells.
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Everything a policy may look at when picking a target.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext<'a> {
    pub map: &'a GridMap,
    pub player: &'a MovableEntity,
    /// The cell the deciding ghost currently occupies.
    pub own_cell: IVec2,
    /// The deciding ghost's scatter corner.
    pub corner: IVec2,
    /// Read-only snapshot of every ghost, including the deciding one.
    pub peers: &'a [PeerView],
}

impl TargetContext<'_> {
    fn player_cell(&self) -> IVec2 {
        self.map.cell_of(self.player.position)
    }

    /// The (clamped) cell `tiles` tiles ahead of the player along its heading.
    fn ahead_of_player(&self, tiles: f32) -> IVec2 {
        let offset = heading_vec2(self.player.direction) * tiles * CELL_SIZE;
        self.map.cell_of(self.player.position + offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum Targeting {
    /// Heads straight for the player's cell.
    Direct,
    /// Aims a few tiles in front of the player to cut it off.
    Ambush,
    /// Mirrors the direct chaser through a point just ahead of the player.
    Reflection,
    /// Chases from afar, retreats to its corner when close.
    ProximityRetreat,
}

impl Targeting {
    /// The target cell for the given phase. Scatter always means the ghost's own corner.
    pub fn target(self, phase: Phase, ctx: &TargetContext<'_>) -> IVec2 {
        match phase {
            Phase::Scatter => ctx.corner,
            Phase::Chase => self.chase_target(ctx),
        }
    }

    pub fn chase_target(self, ctx: &TargetContext<'_>) -> IVec2 {
        match self {
            Targeting::Direct => ctx.player_cell(),
            Targeting::Ambush => ctx.ahead_of_player(AMBUSH_LOOKAHEAD),
            Targeting::Reflection => {
                let Some(chaser) = ctx.peers.iter().find(|peer| peer.ghost_type.targeting() == Targeting::Direct) else {
                    return Targeting::Direct.chase_target(ctx);
                };

                let pivot = ctx.ahead_of_player(REFLECTION_LOOKAHEAD);
                ctx.map.clamp_cell(pivot + (pivot - chaser.cell))
            }
            Targeting::ProximityRetreat => {
                let player_cell = ctx.player_cell();
                if manhattan(ctx.own_cell, player_cell) <= RETREAT_DISTANCE {
                    ctx.corner
                } else {
                    player_cell
                }
            }
        }
    }
}
