//! Bouncing balls scene
//!
//! A scene owns an arena plus the presentation state around it: pause,
//! debug labels, death animations and sound levels. Input arrives as a
//! [`SceneInput`] per frame; sounds and overlays go out through an
//! [`EffectSink`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ArenaConfig, ConfigError};
use crate::consts::{DEATH_EFFECT_ANIM_CYCLE, DEATH_EFFECT_LIFE};
use crate::effects::{AudioLevels, EffectSink, SoundEffect};
use crate::sim::{Arena, BodyId, Color, SimEvent};
use crate::snapshot::{BodySnapshot, snapshots};

/// One-shot toggles for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneInput {
    pub toggle_pause: bool,
    /// Ball id overlay
    pub toggle_labels: bool,
    /// Death animations on/off
    pub toggle_effects: bool,
    pub toggle_sound: bool,
    /// Respawn all balls
    pub restart: bool,
    pub quit: bool,
}

/// Short explosion overlay where a ball died
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEffect {
    pub body: BodyId,
    pub position: Vec2,
    pub color: Color,
    /// Ticks left
    pub life: u32,
}

impl DeathEffect {
    pub fn new(body: BodyId, position: Vec2, color: Color) -> Self {
        Self {
            body,
            position,
            color,
            life: DEATH_EFFECT_LIFE,
        }
    }

    /// Which of the two explosion frames to show
    pub fn frame(&self) -> u32 {
        (self.life / DEATH_EFFECT_ANIM_CYCLE) % 2
    }

    pub fn age(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.life == 0
    }
}

/// Arena plus the player-facing toggles and running death effects
pub struct Scene {
    arena: Arena,
    rng: Pcg32,
    paused: bool,
    effects_enabled: bool,
    audio: AudioLevels,
    death_effects: Vec<DeathEffect>,
    valid: bool,
}

impl Scene {
    /// Build a scene whose spawning is driven by `seed`
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(config: ArenaConfig, mut rng: Pcg32) -> Result<Self, ConfigError> {
        let arena = Arena::new(config, &mut rng)?;
        Ok(Self::from_parts(arena, rng))
    }

    /// Wrap an existing arena; `rng` is used for restarts
    pub fn from_parts(arena: Arena, rng: Pcg32) -> Self {
        Self {
            arena,
            rng,
            paused: false,
            effects_enabled: true,
            audio: AudioLevels::default(),
            death_effects: Vec::new(),
            valid: true,
        }
    }

    /// Process one frame: apply toggles, then step the arena unless paused.
    ///
    /// Returns the simulation events of the step (empty while paused).
    pub fn update(
        &mut self,
        input: &SceneInput,
        sink: &mut dyn EffectSink,
    ) -> Result<Vec<SimEvent>, ConfigError> {
        if input.quit {
            log::info!("Scene ended");
            self.valid = false;
        }
        if input.toggle_pause {
            self.paused = !self.paused;
        }
        if input.toggle_labels {
            self.arena.toggle_labels();
        }
        if input.toggle_effects {
            self.effects_enabled = !self.effects_enabled;
        }
        if input.toggle_sound {
            self.audio.toggle_muted();
        }
        if input.restart {
            self.restart()?;
        }

        if !self.valid {
            return Ok(Vec::new());
        }

        // Effects run on frame time, pause or not
        for effect in &mut self.death_effects {
            effect.age();
        }
        self.death_effects.retain(|e| !e.is_finished());

        if self.paused {
            return Ok(Vec::new());
        }

        let events = self.arena.step();
        for event in &events {
            match *event {
                SimEvent::WallBounce { .. } => self.audio.play(sink, SoundEffect::WallHit),
                SimEvent::PairCollision { .. } => self.audio.play(sink, SoundEffect::BallHit),
                SimEvent::Death {
                    body,
                    position,
                    color,
                } => {
                    if self.effects_enabled {
                        self.death_effects.push(DeathEffect::new(body, position, color));
                        sink.death_effect(position, color);
                    }
                }
            }
        }
        Ok(events)
    }

    /// Respawn every ball and drop running effects
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.death_effects.clear();
        self.arena.reset(&mut self.rng)?;
        log::info!("Scene restarted");
        Ok(())
    }

    /// Remove dead balls from the arena. Returns their ids.
    pub fn reap_dead(&mut self) -> Vec<BodyId> {
        self.arena.remove_dead()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        snapshots(&self.arena)
    }

    pub fn death_effects(&self) -> &[DeathEffect] {
        &self.death_effects
    }

    pub fn audio_mut(&mut self) -> &mut AudioLevels {
        &mut self.audio
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn effects_enabled(&self) -> bool {
        self.effects_enabled
    }

    /// False once the scene has been told to quit
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
