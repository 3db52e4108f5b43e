//! Pairwise collision detection and response
//!
//! Two bodies collide when their circles touch or overlap. Resolution pushes
//! them apart, reflects their velocities about the line between centers, and
//! charges each live body one unit of collision budget.

use glam::Vec2;

use super::body::Body;
use super::event::SimEvent;
use super::geometry::{FALLBACK_NORMAL, distance, overlaps, reflect};
use crate::config::SeparationMode;

/// Contact between two overlapping bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    /// Unit normal pointing from the first body toward the second
    pub normal: Vec2,
    /// Overlap depth: (r_a + r_b) - distance, zero when just touching
    pub penetration: f32,
    /// Midpoint between the two surfaces along the normal
    pub point: Vec2,
}

/// Check two bodies for overlap
///
/// Coincident centers give [`FALLBACK_NORMAL`] as the contact normal.
pub fn pair_contact(a: &Body, b: &Body) -> Option<PairContact> {
    if !overlaps(&a.circle, &b.circle) {
        return None;
    }
    let dist = distance(&a.circle, &b.circle);
    let normal = (b.center() - a.center()).normalize_or(FALLBACK_NORMAL);
    let penetration = (a.radius() + b.radius()) - dist;
    let surface_a = a.center() + normal * a.radius();
    let surface_b = b.center() - normal * b.radius();
    Some(PairContact {
        normal,
        penetration,
        point: (surface_a + surface_b) * 0.5,
    })
}

/// How far a body moves out of an overlap.
///
/// Live bodies split the depth; a live body against a dead one takes all
/// of it since the dead one is frozen. Dead bodies never move.
fn push_share(this: &Body, other: &Body, penetration: f32) -> f32 {
    match (this.is_alive(), other.is_alive()) {
        (false, _) => 0.0,
        (true, true) => penetration / 2.0,
        // double share
        (true, false) => penetration,
    }
}

/// Push two overlapping bodies apart.
///
/// `vel_a`/`vel_b` are the pre-collision velocities, used by
/// [`SeparationMode::Backtrack`].
fn separate(
    a: &mut Body,
    b: &mut Body,
    contact: &PairContact,
    vel_a: Vec2,
    vel_b: Vec2,
    mode: SeparationMode,
) {
    let share_a = push_share(a, b, contact.penetration);
    let share_b = push_share(b, a, contact.penetration);

    let (dir_a, dir_b) = match mode {
        SeparationMode::CenterLine => (-contact.normal, contact.normal),
        SeparationMode::Backtrack => (
            (-vel_a).normalize_or(-contact.normal),
            (-vel_b).normalize_or(contact.normal),
        ),
    };

    if share_a > 0.0 {
        a.circle.translate(dir_a * share_a);
    }
    if share_b > 0.0 {
        b.circle.translate(dir_b * share_b);
    }
}

/// Resolve one overlapping pair.
///
/// Separation, then velocity reflection from the pre-collision velocities of
/// both bodies, then one unit of budget off each live body. Events go out as
/// `PairCollision`, then `Death` for `a`, then `Death` for `b`.
///
/// Returns false (and does nothing) if the bodies do not overlap or are both
/// dead.
pub fn resolve_pair(
    a: &mut Body,
    b: &mut Body,
    mode: SeparationMode,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !a.is_alive() && !b.is_alive() {
        return false;
    }
    let Some(contact) = pair_contact(a, b) else {
        return false;
    };

    let vel_a = a.velocity();
    let vel_b = b.velocity();

    separate(a, b, &contact, vel_a, vel_b, mode);

    let normal = (b.center() - a.center()).normalize_or(contact.normal);
    if a.is_alive() {
        a.set_velocity(reflect(vel_a, normal));
    }
    if b.is_alive() {
        b.set_velocity(reflect(vel_b, -normal));
    }

    events.push(SimEvent::PairCollision { a: a.id, b: b.id });

    if a.spend_collision() {
        a.mark_dead(events);
    }
    if b.spend_collision() {
        b.mark_dead(events);
    }
    true
}
