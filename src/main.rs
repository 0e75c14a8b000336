use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vibes_invite::api::{EventsApi, HttpApiClient};
use vibes_invite::app::App;
use vibes_invite::config::Config;
use vibes_invite::logging;
use vibes_invite::types::template_catalog;
use vibes_invite::ui::install_panic_hook;
use vibes_invite::workflow::WorkflowStep;

#[derive(Parser)]
#[command(name = "vibes-invite")]
#[command(about = "Build and send an event invitation from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the invitation template catalog
    Templates {
        /// Show features and AR elements
        #[arg(short, long)]
        verbose: bool,
    },

    /// List events you can build an invitation for
    Events,

    /// Show the workflow steps and their progress values
    Steps,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Templates { verbose }) => cmd_templates(verbose),
        Some(Commands::Events) => cmd_events(&config).await?,
        Some(Commands::Steps) => cmd_steps(),
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::from_config(&config)?;
    let result = app.run().await;

    if let Some(log_path) = log_file_path {
        if log_path.metadata().is_ok_and(|m| m.len() > 0) {
            eprintln!("Session log: {}", log_path.display());
        }
    }

    result
}

fn cmd_templates(verbose: bool) {
    println!("Templates ({})", template_catalog().len());
    println!("{}", "─".repeat(60));
    for template in template_catalog() {
        let premium = if template.is_premium { " [premium]" } else { "" };
        println!(
            "{:<22} {}{} ({})",
            template.id,
            template.name,
            premium,
            template.category.label()
        );
        if verbose {
            for feature in &template.features {
                println!("    + {}", feature);
            }
            if template.supports_ar() {
                println!("    AR: {}", template.ar_elements.join(", "));
            }
        }
    }
}

async fn cmd_events(config: &Config) -> Result<()> {
    let client = HttpApiClient::from_config(&config.api)?;
    let events = client.list_events().await?;

    if events.is_empty() {
        println!("No events found");
        return Ok(());
    }

    println!("Events ({})", events.len());
    println!("{}", "─".repeat(60));
    for event in &events {
        println!("{:<26} {}", event.id, event.title);
        println!("{:<26} {}", "", event.schedule_line());
    }
    Ok(())
}

fn cmd_steps() {
    for step in WorkflowStep::ALL {
        println!(
            "{}. {:<16} {:>3}%",
            step.index() + 1,
            step.label(),
            step.progress()
        );
    }
}
