//! Deterministic simulation module
//!
//! All physics and lifecycle logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no clock
//! - Injected RNG only (spawning is the only random part)
//! - Stable iteration order (spawn order)
//! - No rendering, audio, or platform dependencies

pub mod body;
pub mod collision;
pub mod event;
pub mod geometry;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, Color};
pub use collision::{PairContact, pair_contact, resolve_pair};
pub use event::{Axis, SimEvent};
pub use geometry::{
    Aabb, Circle, FALLBACK_NORMAL, distance, overlaps, reflect, squared_distance, unit_normal,
};
pub use state::{Arena, Bounds};
pub use tick::step;
