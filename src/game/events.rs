use glam::IVec2;

use crate::entity::ghost::GhostType;
use crate::game::mode::Phase;
use crate::game::GameOutcome;

/// Something that happened during a tick, reported to renderers and audio adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten { cell: IVec2 },
    PowerPelletEaten { cell: IVec2 },
    GhostEaten { ghost: GhostType, points: u32 },
    PlayerDied { lives_left: u32 },
    PhaseChanged(Phase),
    FrightenedEnded,
    GameOver(GameOutcome),
}
