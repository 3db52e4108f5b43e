//! Fixed simulation tick
//!
//! Core loop that advances the arena deterministically. Order matters:
//! move, then walls, then pairs in spawn order.

use super::body::Body;
use super::collision::resolve_pair;
use super::event::SimEvent;
use super::state::Arena;
use crate::config::SeparationMode;

/// Advance the arena by one tick and return the events it produced
pub fn step(arena: &mut Arena) -> Vec<SimEvent> {
    let mut events = Vec::new();
    arena.time_ticks += 1;

    for body in arena.bodies.iter_mut().filter(|b| b.is_alive()) {
        body.advance();
    }

    let bounds = arena.config.bounds;
    for body in arena.bodies.iter_mut().filter(|b| b.is_alive()) {
        body.reflect_off_wall(&bounds, &mut events);
    }

    let resolved = resolve_collisions(&mut arena.bodies, arena.config.separation, &mut events);
    if resolved > 0 {
        log::trace!("tick {}: {} pair collisions", arena.time_ticks, resolved);
    }

    events
}

/// Resolve every overlapping unordered pair (i < j) in slice order.
///
/// Dead bodies stay in as static obstacles. Returns the number of pairs
/// resolved.
pub fn resolve_collisions(
    bodies: &mut [Body],
    mode: SeparationMode,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, mode, events) {
                resolved += 1;
            }
        }
    }
    resolved
}
