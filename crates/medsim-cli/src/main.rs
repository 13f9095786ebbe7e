//! CLI frontend for the Medsim patient assessment simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "medsim",
    about = "Medsim: text-driven patient assessment training",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario interactively, reading commands from stdin
    Play {
        /// Scenario JSON file (default: the built-in scenario)
        scenario: Option<PathBuf>,

        /// Only accept exact command syntax
        #[arg(long)]
        no_nlp: bool,

        /// Minimum classifier confidence for natural-language input
        #[arg(short, long, default_value = "0.7")]
        threshold: f64,

        /// Write the final state to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Grade a saved session state
    Grade {
        /// State JSON file written by `play --save`
        state: PathBuf,

        /// Scenario whose reference actions to grade against
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how free text is classified
    Classify {
        /// The text to classify
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Minimum confidence to produce a canonical command
        #[arg(short, long, default_value = "0.7")]
        threshold: f64,

        /// Print the classification as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the realized patient: vitals and body parts after every effect
    Realize {
        /// Scenario JSON file (default: the built-in scenario)
        scenario: Option<PathBuf>,

        /// Realize a saved state instead of the scenario's initial state
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Validate a scenario file
    Check {
        /// Scenario JSON file
        scenario: PathBuf,
    },

    /// Play the built-in scenario's reference actions and grade the result
    Demo {
        /// Feed the actions through the intent classifier as well
        #[arg(long)]
        nlp: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            scenario,
            no_nlp,
            threshold,
            save,
        } => commands::play::run(scenario.as_deref(), !no_nlp, threshold, save.as_deref()),
        Commands::Grade {
            state,
            scenario,
            json,
        } => commands::grade::run(&state, scenario.as_deref(), json),
        Commands::Classify {
            text,
            threshold,
            json,
        } => commands::classify::run(&text.join(" "), threshold, json),
        Commands::Realize { scenario, state } => {
            commands::realize::run(scenario.as_deref(), state.as_deref())
        }
        Commands::Check { scenario } => commands::check::run(&scenario),
        Commands::Demo { nlp } => commands::demo::run(nlp),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
