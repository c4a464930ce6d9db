//! Script command - validate and preview usage scripts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use provswitch_core::{effective_timeout, validate_usage_script, UsageScript};
use provswitch_fetch::substitute_placeholders;

/// Arguments for the script command.
#[derive(clap::Args)]
pub struct ScriptArgs {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Subcommand)]
enum ScriptCommand {
    /// Run the pre-persist validation checks against a script file.
    Validate {
        /// Path to the script descriptor.
        #[arg(long)]
        file: PathBuf,
        /// Declared timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the script with credential placeholders substituted.
    Render {
        /// Path to the script descriptor.
        #[arg(long)]
        file: PathBuf,
        /// API key substituted for `{{apiKey}}`.
        #[arg(long)]
        api_key: String,
        /// Base URL substituted for `{{baseUrl}}`.
        #[arg(long)]
        base_url: Option<String>,
    },
}

/// Runs the script command.
pub async fn run(args: &ScriptArgs) -> Result<()> {
    match &args.command {
        ScriptCommand::Validate { file, timeout } => {
            let code = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let mut script = UsageScript::new(code);
            script.timeout = *timeout;

            match validate_usage_script(&script) {
                Ok(()) => println!(
                    "OK (effective timeout {}s)",
                    effective_timeout(&script)
                ),
                Err(e) => anyhow::bail!("invalid script: {e}"),
            }
        }
        ScriptCommand::Render { file, api_key, base_url } => {
            let code = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            println!(
                "{}",
                substitute_placeholders(&code, api_key, base_url.as_deref())
            );
        }
    }
    Ok(())
}
