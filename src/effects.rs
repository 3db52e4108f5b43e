//! Effect hooks for the presentation layer
//!
//! The simulation never plays sounds or draws anything itself. The scene
//! turns simulation events into calls on an [`EffectSink`]; whatever backs the
//! sink (an audio engine, a sprite layer, a test recorder) decides what
//! actually happens.

use glam::Vec2;

use crate::sim::Color;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits an arena wall
    WallHit,
    /// Two balls hit each other
    BallHit,
}

/// Receiver for sounds and death overlays
pub trait EffectSink {
    /// Play a sound effect at `volume` (0.0 - 1.0, never 0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// A ball died at `position`; spawn an overlay there if desired
    fn death_effect(&mut self, position: Vec2, color: Color);
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn death_effect(&mut self, _position: Vec2, _color: Color) {}
}

/// Sink that remembers every call, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub sounds: Vec<(SoundEffect, f32)>,
    pub deaths: Vec<(Vec2, Color)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.sounds.iter().filter(|(e, _)| *e == effect).count()
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
        self.deaths.clear();
    }
}

impl EffectSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.sounds.push((effect, volume));
    }

    fn death_effect(&mut self, position: Vec2, color: Color) {
        self.deaths.push((position, color));
    }
}

/// Volume levels and mute state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioLevels {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioLevels {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioLevels {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward `effect` to `sink` unless silent
    pub fn play(&self, sink: &mut dyn EffectSink, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play(effect, vol);
    }
}
