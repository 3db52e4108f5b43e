//! Arena state
//!
//! The arena owns every body. Body order is spawn order and never changes
//! within a run, so pairwise iteration is deterministic.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Color};
use super::event::SimEvent;
use super::geometry::Circle;
use crate::config::{ArenaConfig, ConfigError};

/// Axis-aligned arena walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Bounds {
    pub const fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Finite (extents included) and strictly non-empty on both axes
    pub fn is_valid(&self) -> bool {
        [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite())
            && self.width().is_finite()
            && self.height().is_finite()
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }

    /// Uniform random point inside the bounds (inclusive)
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(self.xmin..=self.xmax),
            rng.random_range(self.ymin..=self.ymax),
        )
    }
}

/// Random per-axis velocity: each component has a magnitude in
/// `min..=max` and a random sign.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec2 {
    let mut axis = || {
        let speed = rng.random_range(min..=max);
        if rng.random_bool(0.5) { -speed } else { speed }
    };
    let x = axis();
    let y = axis();
    Vec2::new(x, y)
}

/// The simulated arena and all bodies in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub(super) config: ArenaConfig,
    /// Bodies in spawn order
    pub(super) bodies: Vec<Body>,
    /// Simulation tick counter
    pub(super) time_ticks: u64,
    next_id: u32,
}

impl Arena {
    /// Validate `config` and spawn its bodies using `rng`
    pub fn new<R: Rng + ?Sized>(config: ArenaConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut arena = Self {
            config,
            bodies: Vec::new(),
            time_ticks: 0,
            next_id: 0,
        };
        arena.spawn_all(rng)?;
        Ok(arena)
    }

    /// Build with a seeded PCG generator
    pub fn from_seed(config: ArenaConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// Build around a fixed set of bodies instead of spawning.
    ///
    /// `config.num_bodies` and the spawn settings are ignored. Every body
    /// needs a positive radius and an id no other body uses.
    pub fn with_bodies(config: ArenaConfig, bodies: Vec<Body>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seen = HashSet::with_capacity(bodies.len());
        for body in &bodies {
            let r = body.radius();
            if !(r.is_finite() && r > 0.0) {
                return Err(ConfigError::NonPositiveRadius(r));
            }
            if !seen.insert(body.id) {
                return Err(ConfigError::DuplicateBodyId(body.id.0));
            }
        }
        let next_id = bodies
            .iter()
            .map(|b| b.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        Ok(Self {
            config,
            bodies,
            time_ticks: 0,
            next_id,
        })
    }

    /// Allocate a new body ID
    fn next_body_id(&mut self) -> BodyId {
        // validate() caps num_bodies at u32::MAX, so spawning never wraps
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Rejection-sample a spawn point at least `min_separation_on_spawn`
    /// away from every existing center
    fn find_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        let area = self.config.spawn_area();
        let min_dist = self.config.min_separation_on_spawn;
        (0..self.config.max_spawn_attempts).find_map(|_| {
            let p = area.random_point(rng);
            let crowded = self.bodies.iter().any(|b| b.circle.too_close_to(p, min_dist));
            (!crowded).then_some(p)
        })
    }

    fn spawn_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), ConfigError> {
        let requested = self.config.num_bodies;
        let (vmin, vmax) = self.config.velocity_range;
        let (bmin, bmax) = self.config.collision_budget_range;

        for placed in 0..requested {
            let Some(center) = self.find_spawn_point(rng) else {
                log::warn!(
                    "Gave up spawning after {} attempts ({placed}/{requested} placed)",
                    self.config.max_spawn_attempts
                );
                return Err(ConfigError::SpawnExhausted { placed, requested });
            };
            let id = self.next_body_id();
            let color = Color::random(rng);
            let vel = random_velocity(rng, vmin, vmax);
            let budget = rng.random_range(bmin..=bmax);
            self.bodies.push(Body::new(
                id,
                Circle::new(center, self.config.default_radius),
                vel,
                color,
                budget,
            ));
        }

        if let (Some(pace), Some(first)) = (self.config.pace_setter, self.bodies.first_mut()) {
            first.set_velocity(pace.velocity);
            first.set_budget(pace.budget);
        }

        log::info!(
            "Spawned {} balls in arena {}x{}",
            self.bodies.len(),
            self.config.bounds.width(),
            self.config.bounds.height()
        );
        Ok(())
    }

    /// Clear the arena and spawn a fresh set of bodies (scene restart)
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), ConfigError> {
        self.bodies.clear();
        self.next_id = 0;
        self.time_ticks = 0;
        self.spawn_all(rng)
    }

    /// Advance exactly one tick, returning the events it produced in order
    pub fn step(&mut self) -> Vec<SimEvent> {
        super::tick::step(self)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    /// Bodies in spawn order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Read-only drawing view of every body
    pub fn snapshots(&self) -> Vec<crate::snapshot::BodySnapshot> {
        crate::snapshot::snapshots(self)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn alive_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_alive()).count()
    }

    /// Toggle the debug name overlay on every body
    pub fn toggle_labels(&mut self) {
        for body in &mut self.bodies {
            body.toggle_label();
        }
    }

    /// Drop dead bodies, keeping the order of the rest. Returns removed IDs.
    pub fn remove_dead(&mut self) -> Vec<BodyId> {
        let removed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| !b.is_alive())
            .map(|b| b.id)
            .collect();
        self.bodies.retain(|b| b.is_alive());
        if !removed.is_empty() {
            log::debug!("Removed {} dead balls", removed.len());
        }
        removed
    }
}
