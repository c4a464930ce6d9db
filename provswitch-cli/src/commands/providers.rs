//! Providers command - list and reorder the provider collection.

use anyhow::{bail, Result};
use clap::Subcommand;
use tracing::info;

use provswitch_core::AppKind;
use provswitch_session::ReorderController;

use crate::host::LocalHost;
use crate::AppArg;

/// Arguments for the providers command.
#[derive(clap::Args)]
pub struct ProvidersArgs {
    #[command(subcommand)]
    command: ProvidersCommand,
}

#[derive(Subcommand)]
enum ProvidersCommand {
    /// List providers in display order.
    List {
        /// Target whose collection to list.
        #[arg(long, value_enum)]
        app: AppArg,
    },
    /// Move a provider from one display position to another.
    Reorder {
        /// Target whose collection to reorder.
        #[arg(long, value_enum)]
        app: AppArg,
        /// Current position of the provider (0-based).
        #[arg(long)]
        from: usize,
        /// Destination position (0-based).
        #[arg(long)]
        to: usize,
    },
}

/// Runs the providers command.
pub async fn run(args: &ProvidersArgs) -> Result<()> {
    let host = LocalHost::load_default().await;
    let language = host.settings().get().await.language;

    match args.command {
        ProvidersCommand::List { app } => {
            let app: AppKind = app.into();
            let providers = host.config().providers_sorted(app, language).await;
            let current = host.config().current_id(app).await;

            if providers.is_empty() {
                println!("No providers configured for {app}.");
                return Ok(());
            }

            println!("{:<3} {:<24} {:<8} {:<12} {}", "#", "name", "index", "created", "id");
            println!("{}", "─".repeat(72));
            for (position, p) in providers.iter().enumerate() {
                let marker = if current.as_deref() == Some(p.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                let index = p
                    .sort_index
                    .map_or_else(|| "-".to_string(), |i| i.to_string());
                let created = p
                    .created_at
                    .and_then(chrono::DateTime::from_timestamp_millis)
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string());
                println!(
                    "{marker}{position:<2} {:<24} {index:<8} {created:<12} {}",
                    p.name, p.id
                );
            }
        }
        ProvidersCommand::Reorder { app, from, to } => {
            let app: AppKind = app.into();
            let providers = host.config().providers_sorted(app, language).await;
            let mut controller = ReorderController::new(app, providers, language);

            info!(app = %app, from, to, "Reordering providers");
            if controller.move_provider(&host, from, to).await {
                println!("Order saved:");
                for p in controller.providers() {
                    println!("  {} {}", p.sort_index.unwrap_or_default(), p.name);
                }
            } else {
                bail!("reorder had no effect (same position, out of bounds, or save failed)");
            }
        }
    }
    Ok(())
}
