//! Settings command - inspect and edit global settings.

use anyhow::{bail, Result};
use clap::Subcommand;

use provswitch_session::{Host, SaveOutcome, SettingsSession};

use crate::host::LocalHost;
use crate::ModeArg;

/// Arguments for the settings command.
#[derive(clap::Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the resolved settings as JSON.
    Show,
    /// Switch the operation mode and save.
    SetMode {
        /// New operation mode.
        #[arg(value_enum)]
        mode: ModeArg,
    },
}

/// Runs the settings command.
pub async fn run(args: &SettingsArgs) -> Result<()> {
    let host = LocalHost::load_default().await;

    match args.command {
        SettingsCommand::Show => {
            let settings = host.settings().get().await;
            let override_value = host.get_dir_override().await.ok().flatten();
            println!("{}", serde_json::to_string_pretty(&settings)?);
            match override_value {
                Some(dir) => println!("appConfigDirOverride: {dir}"),
                None => println!("appConfigDirOverride: (default)"),
            }
        }
        SettingsCommand::SetMode { mode } => {
            let mut session = SettingsSession::load(host).await?;
            session.draft_mut().operation_mode = mode.into();
            match session.save().await {
                SaveOutcome::Closed => println!("Operation mode set to {}.", mode_name(mode)),
                SaveOutcome::RestartRequired => {
                    println!("Saved; restart required for the directory change.");
                }
                SaveOutcome::Failed => bail!("settings could not be saved; nothing changed"),
            }
        }
    }
    Ok(())
}

fn mode_name(mode: ModeArg) -> &'static str {
    match mode {
        ModeArg::Write => "write",
        ModeArg::Proxy => "proxy",
    }
}
