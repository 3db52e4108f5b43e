//! Bouncing Balls - a bounded arena of colliding, wearing-out balls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bodies, collisions, tick loop)
//! - `config`: Arena configuration and validation
//! - `scene`: Scene composition (arena + presentation toggles + death effects)
//! - `effects`: Abstract sound/overlay hooks for the presentation layer
//! - `snapshot`: Renderer-facing body snapshots and instance data

pub mod config;
pub mod effects;
pub mod scene;
pub mod sim;
pub mod snapshot;

pub use config::{ArenaConfig, ConfigError, PaceSetter, SeparationMode};
pub use effects::{EffectSink, NullSink, RecordingSink, SoundEffect};
pub use scene::{Scene, SceneInput};
pub use sim::{Arena, Body, BodyId, Bounds, Circle, Color, SimEvent};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default ball radius (pixels)
    pub const DEFAULT_RADIUS: f32 = 25.0;
    /// Default ball count
    pub const DEFAULT_NUM_BODIES: usize = 20;
    /// Default arena size (pixels)
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 800.0;

    /// Per-axis speed range (pixels per tick, sign chosen at random)
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 3.0;

    /// Collisions a ball survives before it dies
    pub const MIN_COLLISION_BUDGET: u32 = 5;
    pub const MAX_COLLISION_BUDGET: u32 = 10;

    /// Pace setter: the first ball is fast and practically immortal
    pub const PACE_SETTER_SPEED: f32 = 5.0;
    pub const PACE_SETTER_BUDGET: u32 = 9_999_999;

    /// Rejection-sampling attempts per ball before giving up on spawn
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

    /// Death effect lifetime (ticks) and frame flip period
    pub const DEATH_EFFECT_LIFE: u32 = 12;
    pub const DEATH_EFFECT_ANIM_CYCLE: u32 = 3;
}
