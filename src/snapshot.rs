//! Renderer-facing views of the arena
//!
//! `BodySnapshot` is the read-only per-ball record a presentation layer draws
//! from. `BodyInstance` packs the same data for a GPU instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Arena, Body, BodyId, Color};

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alive: bool,
    /// Draw the ball's id over it
    pub show_label: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            position: body.center(),
            radius: body.radius(),
            color: body.color,
            alive: body.is_alive(),
            show_label: body.show_label,
        }
    }
}

/// Per-ball instance data for an SDF circle pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub center: [f32; 2],
    pub radius: f32,
    /// 1.0 for live balls, 0.0 for dead ones
    pub alive: f32,
    pub color: [f32; 4],
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        Self {
            center: body.center().to_array(),
            radius: body.radius(),
            alive: if body.is_alive() { 1.0 } else { 0.0 },
            color: body.color.to_f32(),
        }
    }
}

/// Snapshots of every body, in arena order
pub fn snapshots(arena: &Arena) -> Vec<BodySnapshot> {
    arena.bodies().iter().map(BodySnapshot::from).collect()
}

/// Instance data for every body, in arena order
pub fn instances(arena: &Arena) -> Vec<BodyInstance> {
    arena.bodies().iter().map(BodyInstance::from).collect()
}

/// Raw bytes ready for a vertex/instance buffer upload
pub fn instance_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn test_snapshots_follow_arena_order() {
        let config = ArenaConfig {
            num_bodies: 4,
            ..Default::default()
        };
        let arena = Arena::from_seed(config, 21).expect("arena builds");
        let snaps = snapshots(&arena);
        assert_eq!(snaps.len(), 4);
        for (snap, body) in snaps.iter().zip(arena.bodies()) {
            assert_eq!(snap.id, body.id);
            assert_eq!(snap.position, body.center());
            assert!(snap.alive);
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 32);

        let config = ArenaConfig {
            num_bodies: 2,
            ..Default::default()
        };
        let arena = Arena::from_seed(config, 5).expect("arena builds");
        let inst = instances(&arena);
        assert_eq!(instance_bytes(&inst).len(), 64);
        assert_eq!(inst[0].radius, arena.bodies()[0].radius());
        assert_eq!(inst[0].alive, 1.0);
        assert_eq!(inst[0].color[3], 1.0);
    }
}
