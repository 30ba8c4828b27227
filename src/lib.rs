//! ImgPaste: saves pasted and dropped images to disk and patches the
//! document with a reference once the save completes.
//!
//! The library half holds bootstrap, CLI definitions and command handlers;
//! `main.rs` only parses arguments and calls [`run`].

pub mod bootstrap;
pub mod cli;
pub mod commands;

use anyhow::Context;
use tokio::runtime::Handle;

use crate::cli::{Cli, Command, SettingsAction};

/// Execute one CLI invocation.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = bootstrap::resolve_config(cli.config, &cwd)?;
    bootstrap::init_tracing_subscriber(&config.log_dir)?;

    let deps = bootstrap::wire_dependencies(&config, Handle::current()).await?;

    match cli.command {
        Command::Paste(args) => {
            let report = commands::paste::run(&deps, &args).await?;
            if report.consumed {
                println!(
                    "{}: {} image(s) saved, {} failed",
                    args.file.display(),
                    report.saved,
                    report.failed
                );
            } else {
                println!(
                    "{}: nothing saved (saving disabled or no image in the paste)",
                    args.file.display()
                );
            }
        }
        Command::Settings { action } => {
            let settings = match action {
                SettingsAction::Show => commands::settings::show(&deps).await?,
                SettingsAction::Set(args) => commands::settings::set(&deps, &args).await?,
            };
            println!("{}", commands::settings::to_json(&settings)?);
        }
    }

    Ok(())
}
