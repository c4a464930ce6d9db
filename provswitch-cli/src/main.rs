// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Provswitch CLI - provider configuration switching from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List providers for a target
//! provswitch providers list --app claude
//!
//! # Move the provider shown at position 2 to the top
//! provswitch providers reorder --app claude --from 2 --to 0
//!
//! # Inspect and edit settings
//! provswitch settings show
//! provswitch settings set-mode proxy
//!
//! # Config directory overrides
//! provswitch dirs show
//! provswitch dirs set ~/alt/provswitch
//! provswitch dirs reset
//!
//! # Usage scripts
//! provswitch script validate --file usage.js
//! provswitch script render --file usage.js --api-key sk-test
//! ```

mod commands;
mod host;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use provswitch_core::{AppKind, OperationMode};

use commands::{dirs, providers, script, settings};

// ============================================================================
// CLI Definition
// ============================================================================

/// Provswitch CLI - provider configuration switching.
#[derive(Parser)]
#[command(name = "provswitch")]
#[command(about = "Switch provider configurations for Claude and Codex")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and reorder the provider collection.
    #[command(visible_alias = "p")]
    Providers(providers::ProvidersArgs),

    /// Inspect and edit global settings.
    #[command(visible_alias = "s")]
    Settings(settings::SettingsArgs),

    /// Inspect and edit config-directory overrides.
    #[command(visible_alias = "d")]
    Dirs(dirs::DirsArgs),

    /// Validate and preview usage scripts.
    Script(script::ScriptArgs),
}

/// Target selector shared by subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppArg {
    /// Claude Code
    Claude,
    /// OpenAI Codex
    Codex,
}

impl From<AppArg> for AppKind {
    fn from(arg: AppArg) -> Self {
        match arg {
            AppArg::Claude => AppKind::Claude,
            AppArg::Codex => AppKind::Codex,
        }
    }
}

/// Operation mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Write target config directly.
    Write,
    /// Route through the local proxy.
    Proxy,
}

impl From<ModeArg> for OperationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Write => OperationMode::Write,
            ModeArg::Proxy => OperationMode::Proxy,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("provswitch=debug,info")
    } else {
        EnvFilter::new("provswitch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Providers(args) => providers::run(args).await,
        Commands::Settings(args) => settings::run(args).await,
        Commands::Dirs(args) => dirs::run(args).await,
        Commands::Script(args) => script::run(args).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
    Ok(())
}
