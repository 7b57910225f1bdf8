use anyhow::Result;
use clap::{Parser, Subcommand};
use gpv_core::{ScheduleError, UpdateOutcome};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod config;
mod fetch;
mod logging;
mod notify;
mod pipeline;
mod state;

use config::Config;
use notify::Notifier;

#[derive(Parser, Debug)]
#[command(
    name = "gpv",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GPV_BUILD_SHA"), ")"),
    about = "Hourly power-outage schedule scraper and renderer"
)]
struct Cli {
    /// Path to the TOML config (missing file = defaults)
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch (or read) the announcements page and persist the schedule if it changed
    Update {
        /// Read the page from a saved file instead of fetching it
        #[arg(long)]
        input: Option<PathBuf>,

        /// Treat --input as HTML (implied for .html/.htm files)
        #[arg(long)]
        html: bool,
    },

    /// Render the latest schedule document to PNG
    Render {
        /// Document to render (defaults to the newest *.json in the output directory)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output PNG path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Update, then render and send the image when the schedule changed
    Run,

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands run without touching the log file.
    if let Command::Config { command } = cli.command {
        return config_command(&cli.config, command);
    }

    let cfg = config::load_config(&cli.config)?;
    let _guard = logging::init(&cfg.paths.log_file, cli.verbose)?;
    let notifier = Notifier::from_config(&cfg.telegram);
    if !notifier.is_enabled() {
        info!("telegram notifications disabled");
    }

    match execute(&cli.config, &cfg, &notifier, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) if is_soft(&e) => {
            warn!(reason = %e, "no update performed");
            Ok(())
        }
        Err(e) => {
            notifier.send_error(&format!("{e:#}")).await;
            Err(e)
        }
    }
}

fn is_soft(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ScheduleError>().is_some_and(ScheduleError::is_soft)
}

fn config_command(path: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(path),
        ConfigCommand::Show => {
            let cfg = config::load_config(path)?;
            print!("{}", toml::to_string_pretty(&cfg)?);
            Ok(())
        }
    }
}

async fn execute(
    config_path: &Path,
    cfg: &Config,
    notifier: &Notifier,
    command: Command,
) -> Result<()> {
    match command {
        Command::Update { input, html } => {
            let outcome = pipeline::run_update(cfg, input.as_deref(), html).await?;
            report(&outcome);
        }

        Command::Render { document, output } => {
            let out = pipeline::run_render(cfg, document.as_deref(), output.as_deref())?;
            println!("Saved {}", out.display());
        }

        Command::Run => {
            let outcome = pipeline::run_update(cfg, None, false).await?;
            report(&outcome);
            if let UpdateOutcome::Updated(doc) = &outcome {
                let out = pipeline::run_render(cfg, Some(&cfg.paths.document_file), None)?;
                send_image(notifier, &out, &doc.fact.update).await;
            }
        }

        Command::Config { command } => config_command(config_path, command)?,
    }

    Ok(())
}

fn report(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::Updated(doc) => println!("Updated ({} dates)", doc.fact.data.len()),
        UpdateOutcome::Unchanged => println!("Unchanged"),
    }
}

async fn send_image(notifier: &Notifier, path: &Path, update: &str) {
    let caption = if update.is_empty() {
        "Оновлено графік відключень".to_string()
    } else {
        format!("Оновлено графік відключень ({update})")
    };
    info!(path = %path.display(), "sending image");
    notifier.send_photo(path, &caption).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_carries_build_revision() {
        let cmd = Cli::command();
        let version = cmd.get_version().unwrap();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.ends_with(&format!("({})", env!("GPV_BUILD_SHA"))));
        assert!(!env!("GPV_BUILD_SHA").is_empty());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gpv", "render", "--config", "x.toml", "-v"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Render { .. }));
    }
}
