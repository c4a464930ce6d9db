//! Dirs command - inspect and edit config-directory overrides.

use anyhow::Result;
use clap::Subcommand;

use provswitch_core::AppKind;
use provswitch_session::Host;
use provswitch_store::ConfigDirKind;

use crate::host::LocalHost;

/// Arguments for the dirs command.
#[derive(clap::Args)]
pub struct DirsArgs {
    #[command(subcommand)]
    command: DirsCommand,
}

#[derive(Subcommand)]
enum DirsCommand {
    /// Show the effective config directories.
    Show,
    /// Set the application-level config-directory override.
    Set {
        /// New directory; takes effect on next launch.
        path: String,
    },
    /// Clear the application-level override and fall back to the default.
    Reset,
}

/// Runs the dirs command.
pub async fn run(args: &DirsArgs) -> Result<()> {
    let host = LocalHost::load_default().await;

    match &args.command {
        DirsCommand::Show => {
            let kinds = [
                ConfigDirKind::App,
                ConfigDirKind::Target(AppKind::Claude),
                ConfigDirKind::Target(AppKind::Codex),
            ];
            let override_value = host.get_dir_override().await.ok().flatten();
            for kind in kinds {
                let dir = host.resolved_config_dir(kind).await?;
                let note = match (kind, &override_value) {
                    (ConfigDirKind::App, Some(_)) => " (override)",
                    _ => "",
                };
                println!("{:<8} {dir}{note}", kind.label());
            }
        }
        DirsCommand::Set { path } => {
            host.set_dir_override(Some(path)).await?;
            println!("Override saved; restart required to take effect.");
        }
        DirsCommand::Reset => {
            host.set_dir_override(None).await?;
            let dir = host.resolved_config_dir(ConfigDirKind::App).await?;
            println!("Override cleared; default is {dir}.");
        }
    }
    Ok(())
}
