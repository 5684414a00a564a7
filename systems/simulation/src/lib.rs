#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step orchestration of a play session.
//!
//! [`Simulation`] owns the world, the session random source and every system.
//! One call to [`Simulation::step`] advances the session by exactly one tick:
//! the player acts first, then the formation sways, every enemy runs its
//! behavior, entities move and finally collisions are resolved. Each phase
//! reads a fresh snapshot of the world, so later phases observe the commands
//! applied by earlier ones.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use squadron_core::{
    config::DifficultyConfig, Command, Event, FrameSnapshot, SessionStatus, Steer, WaveIndex,
};
use squadron_system_collision::Collision;
use squadron_system_enemy_behavior::{Behavior, Situation};
use squadron_system_formation::Formation;
use squadron_system_wave_generation::WaveGeneration;
use squadron_world::{self as world, query, World};

/// Player intents sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    /// Steer towards the left wall.
    pub move_left: bool,
    /// Steer towards the right wall.
    pub move_right: bool,
    /// Fire a volley if the weapon is ready.
    pub fire: bool,
    /// Toggle the pause state.
    pub pause: bool,
    /// Start over from wave one after a game over or a cleared wave.
    pub restart: bool,
    /// Continue with the next wave once the current one is cleared.
    pub next_wave: bool,
}

impl Intents {
    /// Steering requested this tick. Right wins when both directions are held.
    #[must_use]
    pub const fn steer(&self) -> Steer {
        if self.move_right {
            Steer::Right
        } else if self.move_left {
            Steer::Left
        } else {
            Steer::Idle
        }
    }
}

/// A running session together with the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    config: DifficultyConfig,
    rng: ChaCha8Rng,
    waves: WaveGeneration,
    formation: Formation,
    behavior: Behavior,
    collision: Collision,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Starts a session on wave one.
    #[must_use]
    pub fn new(config: DifficultyConfig, seed: u64) -> Self {
        Self::with_high_score(config, seed, 0)
    }

    /// Starts a session on wave one, remembering a high score from earlier sessions.
    #[must_use]
    pub fn with_high_score(config: DifficultyConfig, seed: u64, high_score: u64) -> Self {
        let mut simulation = Self {
            world: World::new().with_high_score(high_score),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            waves: WaveGeneration::new(seed),
            formation: Formation,
            behavior: Behavior,
            collision: Collision::default(),
            commands: Vec::new(),
            events: Vec::new(),
        };
        tracing::info!(seed, high_score, "starting session");
        simulation.start_session();
        simulation
    }

    /// Advances the session by one tick and returns the events it produced.
    pub fn step(&mut self, intents: Intents) -> &[Event] {
        self.events.clear();

        let status = query::status(&self.world);
        if intents.restart && status != SessionStatus::Playing {
            self.start_session();
        } else if intents.next_wave && status == SessionStatus::WaveCleared {
            self.start_next_wave();
        }

        if intents.pause {
            let paused = !query::is_paused(&self.world);
            self.commands.push(Command::SetPaused { paused });
            self.flush();
        }

        if query::is_paused(&self.world) || query::status(&self.world) != SessionStatus::Playing {
            return &self.events;
        }

        self.commands.push(Command::Tick);
        self.commands.push(Command::SteerPlayer {
            steer: intents.steer(),
        });
        if intents.fire {
            self.commands.push(Command::FirePlayer);
        }
        self.flush();

        self.formation.handle(
            &query::enemy_view(&self.world),
            query::formation_direction(&self.world),
            &mut self.commands,
        );
        self.flush();

        let situation = Situation {
            wave: query::wave(&self.world),
            startup_grace: query::in_startup_grace(&self.world),
            live_enemy_bullets: query::enemy_bullets(&self.world).len(),
            curve: &self.config.difficulty,
        };
        self.behavior.handle(
            &situation,
            &query::enemy_view(&self.world),
            &mut self.rng,
            &mut self.commands,
        );
        self.flush();

        self.commands.push(Command::AdvanceEntities);
        self.flush();

        self.collision.handle(
            &query::frame_snapshot(&self.world),
            &self.config.item,
            &mut self.rng,
            &mut self.commands,
        );
        self.flush();

        &self.events
    }

    /// Events produced by the last call to [`Simulation::step`] or by construction.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Everything the presentation layer needs to draw the current tick.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        query::frame_snapshot(&self.world)
    }

    /// Read access to the world for callers that need individual queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the session runs with.
    #[must_use]
    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    fn start_session(&mut self) {
        self.commands.push(Command::ResetSession);
        self.waves
            .handle(WaveIndex::FIRST, &self.config, &mut self.commands);
        self.flush();
    }

    fn start_next_wave(&mut self) {
        let next = query::wave(&self.world).next();
        self.commands.push(Command::SetPaused { paused: false });
        self.waves.handle(next, &self.config, &mut self.commands);
        self.flush();
    }

    fn flush(&mut self) {
        let start = self.events.len();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in &self.events[start..] {
            trace_event(event);
        }
    }
}

fn trace_event(event: &Event) {
    match event {
        Event::SessionReset => tracing::debug!("session reset"),
        Event::WaveStarted { wave, enemies } => {
            tracing::info!(wave = wave.get(), enemies = *enemies, "wave started");
        }
        Event::WaveCleared { wave } => tracing::info!(wave = wave.get(), "wave cleared"),
        Event::GameOver { score } => tracing::info!(score = *score, "game over"),
        Event::PauseChanged { paused } => tracing::debug!(paused = *paused, "pause changed"),
        Event::PlayerHit { lives_remaining } => {
            tracing::debug!(lives_remaining = *lives_remaining, "player hit");
        }
        Event::PlayerCaptured => tracing::debug!("player captured"),
        Event::HighScoreBeaten { score } => tracing::trace!(score = *score, "high score beaten"),
        _ => {}
    }
}
