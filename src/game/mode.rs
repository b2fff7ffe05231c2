//! Global scatter/chase timetable and the frightened countdown.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use tracing::debug;

use crate::constants::timing::{FRIGHTENED_DURATION, PHASE_SCHEDULE};

/// The two alternating phases that pick a ghost's default target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Scatter,
    Chase,
}

/// One row of the timetable: how long (in seconds) a phase lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub phase: Phase,
    pub duration: f32,
}

impl From<(Phase, f32)> for PhaseEntry {
    fn from((phase, duration): (Phase, f32)) -> Self {
        Self { phase, duration }
    }
}

/// The default timetable as a list of entries.
pub fn default_schedule() -> Vec<PhaseEntry> {
    PHASE_SCHEDULE.into_iter().map(PhaseEntry::from).collect()
}

/// What the scheduler reports after advancing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTick {
    pub phase: Phase,
    /// The timetable moved on to a new entry during this frame.
    pub phase_switched: bool,
    pub frightened: bool,
    /// The frightened countdown ran out during this frame.
    pub frightened_ended: bool,
}

/// Drives the phase timetable, the frightened countdown and the eat chain.
///
/// The timetable never loops: once the final entry is reached it holds forever,
/// whatever its duration.
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    schedule: Vec<PhaseEntry>,
    index: usize,
    elapsed: f32,
    fright_duration: f32,
    fright_remaining: f32,
    eat_chain: u32,
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new(default_schedule(), FRIGHTENED_DURATION)
    }
}

impl PhaseScheduler {
    /// An empty schedule is treated as an endless chase.
    pub fn new(mut schedule: Vec<PhaseEntry>, fright_duration: f32) -> Self {
        if schedule.is_empty() {
            schedule.push(PhaseEntry {
                phase: Phase::Chase,
                duration: f32::INFINITY,
            });
        }

        Self {
            schedule,
            index: 0,
            elapsed: 0.0,
            fright_duration,
            fright_remaining: 0.0,
            eat_chain: 0,
        }
    }

    pub fn advance(&mut self, dt: f32) -> ModeTick {
        self.elapsed += dt;

        let mut phase_switched = false;
        while self.index + 1 < self.schedule.len() && self.elapsed > self.schedule[self.index].duration {
            self.elapsed -= self.schedule[self.index].duration;
            self.index += 1;
            phase_switched = true;
            debug!(phase = %self.phase(), index = self.index, "Phase switched");
        }

        let was_frightened = self.is_frightened();
        if was_frightened {
            self.fright_remaining = (self.fright_remaining - dt).max(0.0);
        }
        let frightened = self.is_frightened();
        if was_frightened && !frightened {
            debug!("Frightened window over");
        }

        ModeTick {
            phase: self.phase(),
            phase_switched,
            frightened,
            frightened_ended: was_frightened && !frightened,
        }
    }

    pub fn phase(&self) -> Phase {
        self.schedule[self.index].phase
    }

    /// Position in the timetable, counting from zero.
    pub fn phase_index(&self) -> usize {
        self.index
    }

    /// Seconds spent in the current timetable entry.
    pub fn phase_elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_frightened(&self) -> bool {
        self.fright_remaining > 0.0
    }

    pub fn frightened_remaining(&self) -> f32 {
        self.fright_remaining
    }

    /// (Re)starts the frightened countdown and resets the eat chain.
    pub fn trigger_frightened(&mut self) {
        debug!(duration = self.fright_duration, "Frightened window started");
        self.fright_remaining = self.fright_duration;
        self.eat_chain = 0;
    }

    pub fn clear_frightened(&mut self) {
        self.fright_remaining = 0.0;
    }

    pub fn eat_chain(&self) -> u32 {
        self.eat_chain
    }

    pub fn reset_eat_chain(&mut self) {
        self.eat_chain = 0;
    }

    /// Scores one eaten ghost: `base * 2^chain`, then moves the chain one step along.
    pub fn award_ghost(&mut self, base: u32) -> u32 {
        let points = base.saturating_mul(2u32.saturating_pow(self.eat_chain));
        self.eat_chain += 1;
        points
    }
}
