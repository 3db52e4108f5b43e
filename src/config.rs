//! Arena configuration
//!
//! Captured once at arena construction and validated there. JSON on disk,
//! with every field optional (missing fields take the defaults below).

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Bounds;

/// Fatal configuration problems, reported at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ball radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("arena bounds are inverted or degenerate: x {xmin}..{xmax}, y {ymin}..{ymax}")]
    InvalidBounds {
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
    },
    #[error("velocity range {min}..={max} is empty or negative")]
    EmptyVelocityRange { min: f32, max: f32 },
    #[error("collision budget range {min}..={max} is empty")]
    EmptyBudgetRange { min: u32, max: u32 },
    #[error("minimum spawn separation must be non-negative, got {0}")]
    NegativeSeparation(f32),
    #[error("{0} balls requested, ids only go up to u32::MAX")]
    TooManyBodies(usize),
    #[error("ball id {0} is used more than once")]
    DuplicateBodyId(u32),
    #[error("spawn margin {margin} leaves no room inside the arena")]
    SpawnAreaTooSmall { margin: f32 },
    #[error("could only place {placed} of {requested} balls without crowding")]
    SpawnExhausted { placed: usize, requested: usize },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// How overlapping bodies are pushed apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationMode {
    /// Push apart along the line between centers
    #[default]
    CenterLine,
    /// Back each body up along its own velocity
    Backtrack,
}

/// Overrides for the first spawned ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceSetter {
    pub velocity: Vec2,
    pub budget: u32,
}

impl Default for PaceSetter {
    fn default() -> Self {
        Self {
            velocity: Vec2::splat(PACE_SETTER_SPEED),
            budget: PACE_SETTER_BUDGET,
        }
    }
}

/// Arena construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub num_bodies: usize,
    pub bounds: Bounds,
    pub default_radius: f32,
    /// Spawn points closer than this to an existing center are rejected
    pub min_separation_on_spawn: f32,
    /// Per-axis speed magnitude range, inclusive
    pub velocity_range: (f32, f32),
    /// Starting collision budget range, inclusive
    pub collision_budget_range: (u32, u32),
    /// Inset from the walls for spawn points (defaults to twice the radius)
    pub spawn_margin: Option<f32>,
    pub max_spawn_attempts: u32,
    pub pace_setter: Option<PaceSetter>,
    pub separation: SeparationMode,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::for_screen(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

impl ArenaConfig {
    /// Defaults for an arena covering a `width` x `height` screen
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            num_bodies: DEFAULT_NUM_BODIES,
            bounds: Bounds::new(0.0, width, 0.0, height),
            default_radius: DEFAULT_RADIUS,
            min_separation_on_spawn: DEFAULT_RADIUS * 2.0,
            velocity_range: (MIN_SPEED, MAX_SPEED),
            collision_budget_range: (MIN_COLLISION_BUDGET, MAX_COLLISION_BUDGET),
            spawn_margin: None,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            pace_setter: Some(PaceSetter::default()),
            separation: SeparationMode::CenterLine,
        }
    }

    /// Effective spawn inset
    pub fn spawn_margin(&self) -> f32 {
        self.spawn_margin.unwrap_or(self.default_radius * 2.0)
    }

    /// Rectangle spawn points are drawn from
    pub fn spawn_area(&self) -> Bounds {
        let m = self.spawn_margin();
        Bounds::new(
            self.bounds.xmin + m,
            self.bounds.xmax - m,
            self.bounds.ymin + m,
            self.bounds.ymax - m,
        )
    }

    /// Check every field; the arena refuses to build from an invalid config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if u32::try_from(self.num_bodies).is_err() {
            return Err(ConfigError::TooManyBodies(self.num_bodies));
        }

        let r = self.default_radius;
        if !(r.is_finite() && r > 0.0) {
            return Err(ConfigError::NonPositiveRadius(r));
        }

        let b = &self.bounds;
        if !b.is_valid() {
            return Err(ConfigError::InvalidBounds {
                xmin: b.xmin,
                xmax: b.xmax,
                ymin: b.ymin,
                ymax: b.ymax,
            });
        }

        let (min, max) = self.velocity_range;
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && min <= max) {
            return Err(ConfigError::EmptyVelocityRange { min, max });
        }

        let (min, max) = self.collision_budget_range;
        if min > max {
            return Err(ConfigError::EmptyBudgetRange { min, max });
        }

        let sep = self.min_separation_on_spawn;
        if !(sep.is_finite() && sep >= 0.0) {
            return Err(ConfigError::NegativeSeparation(sep));
        }

        let margin = self.spawn_margin();
        let area = self.spawn_area();
        let extents_finite = area.width().is_finite() && area.height().is_finite();
        let non_empty = area.xmin <= area.xmax && area.ymin <= area.ymax;
        if !(margin.is_finite() && extents_finite && non_empty) {
            return Err(ConfigError::SpawnAreaTooSmall { margin });
        }

        Ok(())
    }

    /// Parse from JSON, then validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_margin(), 50.0);
        assert_eq!(config.spawn_area(), Bounds::new(50.0, 750.0, 50.0, 750.0));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let config = ArenaConfig {
            default_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let config = ArenaConfig {
            bounds: Bounds::new(100.0, 0.0, 0.0, 100.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let config = ArenaConfig {
            velocity_range: (3.0, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyVelocityRange { .. })
        ));

        let config = ArenaConfig {
            collision_budget_range: (10, 5),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyBudgetRange { .. })
        ));
    }

    #[test]
    fn test_rejects_margin_larger_than_arena() {
        let config = ArenaConfig {
            bounds: Bounds::new(0.0, 80.0, 0.0, 80.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnAreaTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_bounds_with_overflowing_extent() {
        let config = ArenaConfig {
            bounds: Bounds::new(-3e38, 3e38, -3e38, 3e38),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        // A negative margin can push the spawn area past f32::MAX
        let config = ArenaConfig {
            bounds: Bounds::new(0.0, 3e38, 0.0, 100.0),
            spawn_margin: Some(-1e38),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnAreaTooSmall { .. })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rejects_more_bodies_than_ids() {
        let config = ArenaConfig {
            num_bodies: u32::MAX as usize + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyBodies(_))
        ));
    }

    #[test]
    fn test_json_partial_fields_take_defaults() {
        let config = ArenaConfig::from_json(r#"{ "num_bodies": 3, "separation": "backtrack" }"#)
            .expect("valid config");
        assert_eq!(config.num_bodies, 3);
        assert_eq!(config.separation, SeparationMode::Backtrack);
        assert_eq!(config.default_radius, DEFAULT_RADIUS);

        let json = config.to_json().expect("serializes");
        let back = ArenaConfig::from_json(&json).expect("round trips");
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_validation_errors_surface() {
        let err = ArenaConfig::from_json(r#"{ "default_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveRadius(_)));
        assert!(err.to_string().contains("positive"));

        let err = ArenaConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
