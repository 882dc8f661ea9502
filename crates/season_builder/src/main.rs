//! Season Builder CLI
//!
//! Offline tooling for the Rift league core: generate schedules and worlds
//! brackets from a team list, or simulate a whole season and print the table.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use season_builder::{
    build_bracket, build_schedule, build_state, load_team_file, render_table, run_to_completion,
};

#[derive(Parser)]
#[command(name = "season_builder")]
#[command(about = "Build league schedules and brackets from a team list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a double round-robin season schedule
    Schedule {
        /// Input team list JSON
        #[arg(long)]
        teams: PathBuf,

        /// Output fixtures JSON path
        #[arg(long)]
        out: PathBuf,

        /// Hours between consecutive fixtures
        #[arg(long, default_value = "6")]
        spacing_hours: i64,
    },

    /// Build a seeded worlds bracket and its quarterfinal fixtures
    Bracket {
        /// Input team list JSON (8 teams with seed + region)
        #[arg(long)]
        teams: PathBuf,

        /// Output bracket JSON path
        #[arg(long)]
        out: PathBuf,
    },

    /// Simulate a full season and print the final table
    Run {
        /// Input team list JSON
        #[arg(long)]
        teams: PathBuf,

        /// Scheduler RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Hours between consecutive fixtures
        #[arg(long, default_value = "6")]
        spacing_hours: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { teams, out, spacing_hours } => {
            println!("Building season schedule...");
            println!("   Teams: {}", teams.display());

            let team_file = load_team_file(&teams)?;
            let mut state = build_state(&team_file);
            let fixtures = build_schedule(&mut state, Utc::now(), spacing_hours);

            std::fs::write(&out, serde_json::to_string_pretty(&fixtures)?)?;
            println!("Wrote {} fixtures to {}", fixtures.len(), out.display());
        }

        Commands::Bracket { teams, out } => {
            println!("Building worlds bracket...");
            println!("   Teams: {}", teams.display());

            let team_file = load_team_file(&teams)?;
            let mut state = build_state(&team_file);
            let (bracket, quarterfinals) = build_bracket(&mut state, &team_file, Utc::now())?;

            std::fs::write(&out, serde_json::to_string_pretty(&bracket)?)?;
            println!(
                "Wrote bracket with {} quarterfinal fixture(s) to {}",
                quarterfinals.len(),
                out.display()
            );
        }

        Commands::Run { teams, seed, spacing_hours } => {
            println!("Simulating season (seed {})...", seed);

            let team_file = load_team_file(&teams)?;
            let mut state = build_state(&team_file);
            let fixtures = build_schedule(&mut state, Utc::now(), spacing_hours);
            let total = fixtures.len();
            state.add_fixtures(fixtures);

            let ticks = run_to_completion(&mut state, seed)?;
            println!("{} fixtures resolved in {} tick(s)\n", total, ticks);
            println!("{}", render_table(&state));
        }
    }

    Ok(())
}
