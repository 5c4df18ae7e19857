mod crews;
mod heuristics;

use clap::{Parser, Subcommand};
use contentai_agents::Studio;
use contentai_core::{AppConfig, Platform};
use tracing_subscriber::EnvFilter;

use crate::crews::CrewCommands;
use crate::heuristics::HeuristicCommands;

#[derive(Debug, Parser)]
#[command(name = "contentai-cli")]
#[command(about = "Grounded content research and generation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect real videos, trends, and questions for a topic
    Collect {
        topic: String,

        /// Target platform, e.g. youtube, tiktok, reels
        #[arg(long, default_value = "youtube")]
        platform: String,

        /// Print the snapshot as JSON instead of the grounding context
        #[arg(long)]
        json: bool,
    },
    #[command(flatten)]
    Crew(CrewCommands),
    #[command(flatten)]
    Heuristic(HeuristicCommands),
    /// Report which credentials are configured
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = contentai_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect {
            topic,
            platform,
            json,
        }) => run_collect(&config, &topic, &platform, json).await?,
        Some(Commands::Crew(command)) => {
            let studio = Studio::from_config(&config)?;
            crews::run(&studio, command).await?;
        }
        Some(Commands::Heuristic(command)) => {
            let studio = Studio::from_config(&config)?;
            heuristics::run(&studio, command).await?;
        }
        Some(Commands::Health) => print_health(&config),
        None => println!("contentai-cli: run with --help to list commands"),
    }

    Ok(())
}

async fn run_collect(
    config: &AppConfig,
    topic: &str,
    platform: &str,
    json: bool,
) -> anyhow::Result<()> {
    let studio = Studio::from_config(config)?;
    let snapshot = studio.collect(topic, parse_platform(platform)).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot.to_context());
    }

    if !snapshot.has_data() {
        anyhow::bail!(
            "no real data collected for '{topic}' ({} provider errors)",
            snapshot.errors().len()
        );
    }
    Ok(())
}

fn print_health(config: &AppConfig) {
    println!("environment: {}", config.env);
    println!("model:       {}", config.model);
    for credential in config.credential_status() {
        let state = if credential.present { "set" } else { "missing" };
        let required = if credential.required { "required" } else { "optional" };
        println!("{:<22} {state:<8} ({required})", credential.name);
    }
    if config.is_fully_configured() {
        println!("status: ok");
    } else {
        println!("status: degraded");
    }
}

/// Unknown platform labels fall back to YouTube with a warning.
pub(crate) fn parse_platform(label: &str) -> Platform {
    Platform::from_label(label).unwrap_or_else(|| {
        tracing::warn!(platform = label, "unknown platform; using YouTube");
        Platform::YouTube
    })
}
