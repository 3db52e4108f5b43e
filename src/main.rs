//! Bouncing Balls entry point
//!
//! Headless native driver: runs the scene on a fixed timestep and logs what
//! happens. Usage: `bouncing-balls [config.json] [seed] [seconds]`

use std::process::ExitCode;

use glam::Vec2;

use bouncing_balls::consts::*;
use bouncing_balls::{ArenaConfig, Color, EffectSink, Scene, SceneInput, SoundEffect};

/// Sink that reports effects to the log instead of a speaker or screen
#[derive(Default)]
struct LogSink {
    sounds: usize,
    explosions: usize,
}

impl EffectSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.sounds += 1;
        log::trace!("sound {effect:?} at {volume:.2}");
    }

    fn death_effect(&mut self, position: Vec2, color: Color) {
        self.explosions += 1;
        log::debug!(
            "explosion at ({:.1}, {:.1}) tinted #{:02x}{:02x}{:02x}",
            position.x,
            position.y,
            color.r,
            color.g,
            color.b
        );
    }
}

/// Fixed-timestep loop state
struct Game {
    scene: Scene,
    accumulator: f32,
    sink: LogSink,
}

impl Game {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            accumulator: 0.0,
            sink: LogSink::default(),
        }
    }

    /// Run simulation ticks for `dt` seconds of wall time
    fn update(&mut self, dt: f32) -> Result<(), bouncing_balls::ConfigError> {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let events = self.scene.update(&SceneInput::default(), &mut self.sink)?;
            for event in events.iter().filter(|e| e.is_death()) {
                log::info!("{event:?}");
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(())
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => ArenaConfig::load(&path)?,
        _ => ArenaConfig::default(),
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 0x5eed,
    };
    let seconds: f32 = match args.next() {
        Some(s) => s.parse()?,
        None => 30.0,
    };

    log::info!("Bouncing Balls (headless) starting, seed {seed}, {seconds}s");
    let mut game = Game::new(Scene::new(config, seed)?);

    // Frames arrive slightly faster than ticks to exercise the accumulator
    let frame_dt = 1.0 / 75.0;
    let frames = (seconds / frame_dt).ceil() as u32;
    for _ in 0..frames {
        game.update(frame_dt)?;
        if game.scene.arena().alive_count() <= 1 {
            break;
        }
    }

    let arena = game.scene.arena();
    log::info!(
        "Done after {} ticks: {}/{} balls alive, {} sounds, {} explosions",
        arena.time_ticks(),
        arena.alive_count(),
        arena.bodies().len(),
        game.sink.sounds,
        game.sink.explosions
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
