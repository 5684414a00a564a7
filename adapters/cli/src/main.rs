#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Squadron session.

mod autopilot;
mod config;

use std::{
    collections::BTreeMap,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use squadron_core::{Event, SoundCue};
use squadron_simulation::Simulation;
use squadron_world::query;
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;

/// Runs the squadron simulation with an autopilot at the controls.
#[derive(Debug, Parser)]
#[command(name = "squadron", version)]
struct Args {
    /// TOML file overriding the default difficulty configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the session random source.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Upper bound on simulated ticks.
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Stop once this many waves have been cleared.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_waves: u32,
    /// Best score of earlier sessions.
    #[arg(long, default_value_t = 0)]
    high_score: u64,
}

/// Tallies gathered from the event stream.
#[derive(Debug, Default)]
struct Report {
    ticks: u64,
    enemies_destroyed: u32,
    items_collected: u32,
    lives_lost: u32,
    captures: u32,
    new_high_score: bool,
    cues: BTreeMap<&'static str, u32>,
}

impl Report {
    fn record(&mut self, event: &Event) {
        match event {
            Event::TimeAdvanced { .. } => self.ticks += 1,
            Event::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
            Event::ItemCollected { .. } => self.items_collected += 1,
            Event::PlayerHit { .. } => self.lives_lost += 1,
            Event::PlayerCaptured => self.captures += 1,
            Event::HighScoreBeaten { .. } => self.new_high_score = true,
            _ => {}
        }
        if let Some(cue) = event.sound_cue() {
            *self.cues.entry(cue_name(cue)).or_default() += 1;
        }
    }
}

fn cue_name(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Shoot => "shoot",
        SoundCue::Explosion => "explosion",
        SoundCue::Item => "item",
        SoundCue::Bomb => "bomb",
        SoundCue::GameOver => "game over",
    }
}

/// Entry point for the Squadron command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = config::resolve(args.config.as_deref());
    let mut simulation = Simulation::with_high_score(config, args.seed, args.high_score);
    let mut pilot = Autopilot::new(args.max_waves);
    let mut report = Report::default();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", query::welcome_banner(simulation.world()))
        .context("failed to write banner")?;

    for _ in 0..args.ticks {
        let Some(intents) = pilot.decide(&simulation.snapshot()) else {
            break;
        };
        for event in simulation.step(intents) {
            report.record(event);
        }
    }

    let hud = simulation.snapshot().hud;
    tracing::info!(
        ticks = report.ticks,
        score = hud.score,
        status = ?hud.status,
        "session finished"
    );

    writeln!(stdout, "waves cleared:     {}", pilot.waves_cleared())?;
    writeln!(stdout, "reached wave:      {}", hud.wave.get())?;
    writeln!(stdout, "ticks simulated:   {}", report.ticks)?;
    writeln!(stdout, "score:             {}", hud.score)?;
    writeln!(
        stdout,
        "high score:        {}{}",
        hud.high_score,
        if report.new_high_score { " (new)" } else { "" }
    )?;
    writeln!(stdout, "lives:             {}", hud.lives)?;
    writeln!(stdout, "status:            {:?}", hud.status)?;
    writeln!(stdout, "enemies destroyed: {}", report.enemies_destroyed)?;
    writeln!(stdout, "items collected:   {}", report.items_collected)?;
    writeln!(stdout, "lives lost:        {}", report.lives_lost)?;
    writeln!(stdout, "captures:          {}", report.captures)?;
    for (cue, count) in &report.cues {
        writeln!(stdout, "sound {cue:<12} {count}")?;
    }
    stdout.flush().context("failed to flush summary")?;
    Ok(())
}
