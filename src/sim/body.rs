//! Ball bodies and their lifecycle
//!
//! A body is a moving circle that wears out: every resolved pair-collision
//! spends one unit of its collision budget, and at zero it dies. Dead bodies
//! keep their place in the arena as frozen obstacles.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::event::{Axis, SimEvent};
use super::geometry::Circle;
use super::state::Bounds;

/// Stable body identity (assigned in spawn order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// RGBA8 color. Opaque to physics; carried for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Uniformly random opaque color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// Normalized `[r, g, b, a]` for GPU buffers
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub circle: Circle,
    vel: Vec2,
    pub color: Color,
    /// Pair-collisions left before the body dies
    budget: u32,
    alive: bool,
    /// Debug name overlay toggle
    #[serde(default)]
    pub show_label: bool,
}

impl Body {
    pub fn new(id: BodyId, circle: Circle, vel: Vec2, color: Color, budget: u32) -> Self {
        Self {
            id,
            circle,
            vel,
            color,
            budget,
            alive: true,
            show_label: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.circle.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.circle.radius
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Move by one tick of velocity. No bounds checking.
    pub fn advance(&mut self) {
        self.circle.translate(self.vel);
    }

    /// Bounce off the axis-aligned arena walls.
    ///
    /// Each axis is checked on its own, so a body in a corner can bounce on
    /// both in one call. A component is negated only while it still points
    /// toward the wall that was reached.
    pub fn reflect_off_wall(&mut self, bounds: &Bounds, events: &mut Vec<SimEvent>) {
        let c = self.circle.center;
        let r = self.circle.radius;

        let hit_x = (c.x - r <= bounds.xmin && self.vel.x < 0.0)
            || (c.x + r >= bounds.xmax && self.vel.x > 0.0);
        if hit_x {
            self.vel.x = -self.vel.x;
            events.push(SimEvent::WallBounce {
                body: self.id,
                axis: Axis::X,
            });
        }

        let hit_y = (c.y - r <= bounds.ymin && self.vel.y < 0.0)
            || (c.y + r >= bounds.ymax && self.vel.y > 0.0);
        if hit_y {
            self.vel.y = -self.vel.y;
            events.push(SimEvent::WallBounce {
                body: self.id,
                axis: Axis::Y,
            });
        }
    }

    /// Override velocity. Ignored for dead bodies, which stay at rest.
    pub fn set_velocity(&mut self, vel: Vec2) {
        if self.alive {
            self.vel = vel;
        }
    }

    /// Overwrite the remaining budget (spawn-time overrides)
    pub fn set_budget(&mut self, budget: u32) {
        self.budget = budget;
    }

    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Spend one unit of collision budget.
    ///
    /// Returns true if the body is alive and has now run out. Dead bodies are
    /// never charged.
    pub fn spend_collision(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.budget = self.budget.saturating_sub(1);
        self.budget == 0
    }

    /// One-way transition to dead.
    ///
    /// Stops the body, turns it white and emits a `Death` event. Returns false
    /// (and emits nothing) if the body was already dead.
    pub fn mark_dead(&mut self, events: &mut Vec<SimEvent>) -> bool {
        if !self.alive {
            log::debug!("body {} is already dead", self.id);
            return false;
        }
        let color = self.color;
        self.alive = false;
        self.stop();
        self.color = Color::WHITE;
        events.push(SimEvent::Death {
            body: self.id,
            position: self.circle.center,
            color,
        });
        log::debug!(
            "body {} died at ({:.1}, {:.1})",
            self.id,
            self.circle.center.x,
            self.circle.center.y
        );
        true
    }

    pub fn toggle_label(&mut self) {
        self.show_label = !self.show_label;
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(id = {}, center = ({:.2}, {:.2}), velocity = ({:.2}, {:.2}))",
            self.id, self.circle.center.x, self.circle.center.y, self.vel.x, self.vel.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32, vel: Vec2) -> Body {
        Body::new(
            BodyId(0),
            Circle::new(Vec2::new(x, y), 5.0),
            vel,
            Color::rgb(10, 20, 30),
            3,
        )
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut body = body_at(10.0, 10.0, Vec2::new(1.0, 0.0));
        body.advance();
        assert_eq!(body.center(), Vec2::new(11.0, 10.0));
    }

    #[test]
    fn test_wall_reflect_once() {
        let bounds = Bounds::new(0.0, 12.0, 0.0, 100.0);
        let mut body = body_at(10.0, 50.0, Vec2::new(1.0, 0.0));
        let mut events = Vec::new();

        body.advance();
        body.reflect_off_wall(&bounds, &mut events);
        assert_eq!(body.velocity().x, -1.0);
        assert_eq!(
            events,
            vec![SimEvent::WallBounce {
                body: BodyId(0),
                axis: Axis::X
            }]
        );

        // Still overlapping the wall but already heading away: no second flip
        body.advance();
        body.reflect_off_wall(&bounds, &mut events);
        assert_eq!(body.velocity().x, -1.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_corner_bounces_both_axes() {
        let bounds = Bounds::new(0.0, 100.0, 0.0, 100.0);
        let mut body = body_at(4.0, 96.0, Vec2::new(-2.0, 3.0));
        let mut events = Vec::new();
        body.reflect_off_wall(&bounds, &mut events);
        assert_eq!(body.velocity(), Vec2::new(2.0, -3.0));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_mark_dead_is_one_way() {
        let mut body = body_at(0.0, 0.0, Vec2::new(2.0, 2.0));
        let mut events = Vec::new();

        assert!(body.mark_dead(&mut events));
        assert!(!body.is_alive());
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.color, Color::WHITE);
        assert_eq!(
            events,
            vec![SimEvent::Death {
                body: BodyId(0),
                position: Vec2::ZERO,
                color: Color::rgb(10, 20, 30),
            }]
        );

        assert!(!body.mark_dead(&mut events));
        assert_eq!(events.len(), 1);

        body.set_velocity(Vec2::new(1.0, 1.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_budget_saturates() {
        let mut body = body_at(0.0, 0.0, Vec2::ZERO);
        assert!(!body.spend_collision());
        assert!(!body.spend_collision());
        assert!(body.spend_collision());
        assert_eq!(body.budget(), 0);

        body.mark_dead(&mut Vec::new());
        assert!(!body.spend_collision());
        assert_eq!(body.budget(), 0);
    }
}
