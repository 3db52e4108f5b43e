//! Lifecycle events emitted by the simulation step
//!
//! Events are produced in exact per-tick algorithm order; consumers (sound,
//! death animations) read them after the step returns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyId, Color};

/// Wall axis a bounce happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A body reflected off an arena wall
    WallBounce { body: BodyId, axis: Axis },
    /// Two overlapping bodies were resolved against each other
    PairCollision { a: BodyId, b: BodyId },
    /// A body exhausted its collision budget. `color` is the color it had
    /// while alive.
    Death {
        body: BodyId,
        position: Vec2,
        color: Color,
    },
}

impl SimEvent {
    /// True if `id` takes part in this event
    pub fn involves(&self, id: BodyId) -> bool {
        match *self {
            SimEvent::WallBounce { body, .. } | SimEvent::Death { body, .. } => body == id,
            SimEvent::PairCollision { a, b } => a == id || b == id,
        }
    }

    pub fn is_death(&self) -> bool {
        matches!(self, SimEvent::Death { .. })
    }
}
