//! Match runner CLI
//!
//! Runs headless matches on the simulation core and reports results as
//! text or JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use kt_core::engine::{
    HeadlessRunner, MatchClock, MatchEngine, MatchEventKind, MatchWorld, RoleBrain, TeamSide,
};

#[derive(Parser)]
#[command(name = "kicktick")]
#[command(about = "Tick-scheduled football match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one headless match to completion
    Simulate {
        /// Match seed; same seed reproduces the same match
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Match length in simulated minutes
        #[arg(long, default_value_t = 90)]
        minutes: u32,

        /// Home team name
        #[arg(long, default_value = "Home")]
        home: String,

        /// Away team name
        #[arg(long, default_value = "Away")]
        away: String,

        /// Print the full JSON report instead of the one-line summary
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct GoalReport {
    minute: u32,
    tick: u32,
    side: String,
    scorer: Option<usize>,
}

#[derive(Serialize)]
struct TeamStatsReport {
    touches: u32,
    shots: u32,
    possession_pct: f32,
}

#[derive(Serialize)]
struct MatchReport {
    schema_version: u8,
    seed: u64,
    simulated_at: String,
    home: String,
    away: String,
    score_home: u8,
    score_away: u8,
    goals: Vec<GoalReport>,
    stats_home: TeamStatsReport,
    stats_away: TeamStatsReport,
    final_ball_position: (f32, f32),
    final_tick: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seed,
            minutes,
            home,
            away,
            json,
            out,
        } => simulate(seed, minutes, &home, &away, json, out),
    }
}

fn simulate(
    seed: u64,
    minutes: u32,
    home: &str,
    away: &str,
    json: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let world = MatchWorld::with_generated_squads(home, away, seed)
        .context("failed to set up the match")?;
    let engine = MatchEngine::start(
        world,
        Box::new(RoleBrain),
        MatchClock::with_minutes(minutes),
    )
    .context("failed to schedule the opening events")?;

    log::info!("simulating {} vs {} (seed {seed}, {minutes} minutes)", home, away);

    // Yield occasionally so a long match doesn't monopolize the host.
    let mut runner = HeadlessRunner::new(engine).with_yield_every(10_000);
    runner.run().context("simulation aborted")?;

    let final_tick = {
        let engine = runner.sim();
        engine.current_tick()
    };
    let world = runner.into_inner().into_world();

    let report = MatchReport {
        schema_version: 1,
        seed,
        simulated_at: chrono::Utc::now().to_rfc3339(),
        home: home.to_string(),
        away: away.to_string(),
        score_home: world.score.home,
        score_away: world.score.away,
        goals: world
            .goals()
            .filter_map(|event| match event.kind {
                MatchEventKind::Goal { side, scorer } => Some(GoalReport {
                    minute: event.minute,
                    tick: event.tick,
                    side: match side {
                        TeamSide::Home => "home".to_string(),
                        TeamSide::Away => "away".to_string(),
                    },
                    scorer: scorer.map(|id| id.index()),
                }),
                _ => None,
            })
            .collect(),
        stats_home: TeamStatsReport {
            touches: world.stats.home.touches,
            shots: world.stats.home.shots,
            possession_pct: world.stats.possession_pct(TeamSide::Home),
        },
        stats_away: TeamStatsReport {
            touches: world.stats.away.touches,
            shots: world.stats.away.shots,
            possession_pct: world.stats.possession_pct(TeamSide::Away),
        },
        final_ball_position: world.ball.position,
        final_tick,
    };

    let rendered = serde_json::to_string_pretty(&report)?;
    if let Some(path) = &out {
        fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        println!("{rendered}");
    } else {
        println!(
            "{} {} - {} {}",
            report.home, report.score_home, report.score_away, report.away
        );
        for goal in &report.goals {
            println!("  {}' goal: {}", goal.minute, goal.side);
        }
        println!(
            "  possession {:.0}% - {:.0}%, shots {} - {}",
            report.stats_home.possession_pct,
            report.stats_away.possession_pct,
            report.stats_home.shots,
            report.stats_away.shots
        );
    }
    Ok(())
}
