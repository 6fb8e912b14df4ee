// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Collectory CLI - analytics, milestones and achievements for a figure collection

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "collectory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "COLLECTORY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, env = "COLLECTORY_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show collection analytics
    Analyze,

    /// List milestones
    Milestones,

    /// Show collection insights
    Insights,

    /// Check achievements and record new unlocks
    Achievements {
        /// Report without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the collection
    Collection {
        /// Action: add, wish, remove, list
        action: String,

        /// Figure id
        figure_id: Option<String>,

        /// Photo reference to attach
        #[arg(long)]
        photo: Option<String>,
    },

    /// Export the collection for sharing
    Share {
        /// Output format (txt, json, csv)
        #[arg(short, long, default_value = "txt")]
        format: String,

        /// Output file or directory (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show effective configuration
    Config {
        /// Dotted configuration key (omit for everything)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell, Cli::command());
    }

    let mut config = collectory::config::load(cli.config.as_deref()).context("Failed to load configuration")?;
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

    let session = commands::Session {
        color: !cli.no_color && std::io::stdout().is_terminal(),
        json: cli.json,
        now: chrono::Utc::now(),
        config,
    };

    // Execute command
    match cli.command {
        Commands::Analyze => commands::analyze::run(&session),
        Commands::Milestones => commands::milestones::run(&session),
        Commands::Insights => commands::insights::run(&session),
        Commands::Achievements { dry_run } => commands::achievements::run(&session, dry_run),
        Commands::Collection { action, figure_id, photo } => {
            commands::collection::run(&session, &action, figure_id.as_deref(), photo.as_deref())
        }
        Commands::Share { format, output } => commands::share::run(&session, &format, output.as_deref()),
        Commands::Config { key } => commands::config::run(&session, key.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}
