// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Learnpath CLI - dependency-ordered, budget-aware learning plans

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use learnpath::commands::{self, neighbors::Direction, ConstraintArgs, Context};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "LEARNPATH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Data directory override (holds <topic>.json graphs)
    #[arg(long, env = "LEARNPATH_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a graph's resources in dependency order
    Sort {
        /// Graph JSON file
        file: PathBuf,
    },

    /// Check a graph for dependency cycles
    Check {
        /// Graph JSON file
        file: PathBuf,
    },

    /// Remove resources that break per-resource caps
    Prune {
        /// Graph JSON file
        file: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the candidate path without budget selection
    Paths {
        /// Graph JSON file
        file: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,
    },

    /// Build the budget-optimized path for a graph file
    Optimize {
        /// Graph JSON file
        file: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,
    },

    /// Plan a topic from the data directory
    Plan {
        /// Topic ID
        topic: String,

        #[command(flatten)]
        constraints: ConstraintArgs,
    },

    /// List available topics
    Topics,

    /// List direct prerequisites of a resource
    Prereqs {
        /// Graph JSON file
        file: PathBuf,

        /// Resource ID
        id: String,
    },

    /// List direct dependents of a resource
    Dependents {
        /// Graph JSON file
        file: PathBuf,

        /// Resource ID
        id: String,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = learnpath::config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        config,
        json: cli.json,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Sort { file } => commands::sort::run(&ctx, &file),
        Commands::Check { file } => commands::sort::check(&ctx, &file),
        Commands::Prune { file, constraints, output } => {
            commands::prune::run(&ctx, &file, &constraints, output)
        }
        Commands::Paths { file, constraints } => commands::paths::run(&ctx, &file, &constraints),
        Commands::Optimize { file, constraints } => {
            commands::paths::optimize(&ctx, &file, &constraints)
        }
        Commands::Plan { topic, constraints } => commands::plan::run(&ctx, &topic, &constraints),
        Commands::Topics => commands::plan::topics(&ctx),
        Commands::Prereqs { file, id } => {
            commands::neighbors::run(&ctx, &file, &id, Direction::Prerequisites)
        }
        Commands::Dependents { file, id } => {
            commands::neighbors::run(&ctx, &file, &id, Direction::Dependents)
        }
        Commands::Config => commands::config::run(&ctx),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
