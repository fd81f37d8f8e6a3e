// A person playing the match and the runners they have controlled

use crate::core::color::Color;
use crate::core::math::floor_distance;

use super::runner::RunnerId;

/// Index of a player within the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub usize);

/// One player of the match
///
/// Survives every runner it owns; the newest runner is the one input is
/// routed to while it is alive.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub color: Color,
    /// Every runner this player has controlled, oldest first
    pub runners: Vec<RunnerId>,
    /// Furthest x any of this player's runners has reached
    pub distance: i32,
    /// Runners lost without freezing
    pub deaths: u32,
    /// Runners turned into checkpoints
    pub freezes: u32,
}

impl Player {
    pub fn new(id: PlayerId, color: Color) -> Self {
        Self {
            id,
            color,
            runners: Vec::new(),
            distance: 0,
            deaths: 0,
            freezes: 0,
        }
    }

    /// Most recently created runner, whatever its state
    pub fn newest_runner(&self) -> Option<RunnerId> {
        self.runners.last().copied()
    }

    /// Raise the distance score to `x` (floored) if it is further
    pub fn record_distance(&mut self, x: f32) {
        self.distance = self.distance.max(floor_distance(x));
    }
}
