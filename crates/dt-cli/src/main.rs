//! Command-line front end for the downtime tracker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use dt_history::TrackerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "downtime",
    about = "Track downtime actions, checks, and history for a tabletop group",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file holding actions, markers, and history
    #[arg(long, global = true, default_value = "downtime.json")]
    store: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Modifiers shared by `roll` and `perform`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Accuracy steps (threshold roll, default 0)
    #[arg(short, long)]
    accuracy: Option<u32>,

    /// Difficulty steps (threshold roll, default 0)
    #[arg(short, long)]
    difficulty: Option<u32>,

    /// Base pool size (success pool, default 0)
    #[arg(short, long, allow_negative_numbers = true)]
    size: Option<i32>,

    /// Conditional bonus awaiting referee approval, as MAGNITUDE:REASON
    #[arg(short, long = "cond", value_name = "MAGNITUDE:REASON")]
    conditionals: Vec<String>,

    /// Justification for the unconditional modifier
    #[arg(short, long)]
    reason: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a check without recording it
    Roll {
        /// Check kind: threshold or pool
        kind: String,

        #[command(flatten)]
        check: CheckArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Perform a downtime action and record it in the character's history
    Perform {
        /// Character taking the action
        character: String,

        /// Action name (see `downtime actions`)
        action: String,

        #[command(flatten)]
        check: CheckArgs,

        /// Notes stored with the entry
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Marker to file the entry under (default: the current marker)
        #[arg(short, long)]
        marker: Option<String>,
    },

    /// Show a character's downtime history
    History {
        /// Character name (case-insensitive)
        character: String,

        /// Output format: table, markdown, text, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Manage markers (narrative periods)
    Marker {
        #[command(subcommand)]
        command: MarkerCommands,
    },

    /// List the available downtime actions
    Actions,
}

#[derive(Subcommand)]
enum MarkerCommands {
    /// Start a new marker
    Add {
        /// Marker name
        name: String,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List markers in time order
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = TrackerConfig::default().with_store_path(cli.store);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = match cli.command {
        Commands::Roll { kind, check, json } => commands::roll::run(&config, &kind, &check, json),
        Commands::Perform {
            character,
            action,
            check,
            notes,
            marker,
        } => commands::perform::run(
            &config,
            &character,
            &action,
            &check,
            &notes,
            marker.as_deref(),
        ),
        Commands::History { character, format } => {
            commands::history::run(&config, &character, &format)
        }
        Commands::Marker { command } => match command {
            MarkerCommands::Add { name, description } => {
                commands::marker::add(&config, &name, &description)
            }
            MarkerCommands::List => commands::marker::list(&config),
        },
        Commands::Actions => commands::actions::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
