//! Crew commands. Each prints its result as JSON on stdout.

use clap::Subcommand;
use contentai_agents::{AgentError, Studio};
use serde::Serialize;

use crate::parse_platform;

#[derive(Debug, Subcommand)]
pub enum CrewCommands {
    /// Collect real data, find gaps, and write a script grounded in it
    SmartScript {
        topic: String,
        #[arg(long, default_value = "youtube")]
        platform: String,
    },
    /// Find trending topics in a niche
    Topics {
        niche: String,
        /// Focus the search on one topic inside the niche
        #[arg(long)]
        topic: Option<String>,
    },
    /// Research a topic in depth
    Research { topic: String },
    /// Write a platform script
    Write {
        topic: String,
        #[arg(long, default_value = "youtube")]
        platform: String,
        /// Research notes to build the script on
        #[arg(long)]
        research: Option<String>,
    },
    /// Topics, research, script, and social package in one run
    Full {
        niche: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, default_value = "youtube")]
        platform: String,
    },
    /// SEO keywords, titles, and tags for a topic
    Seo { topic: String },
    /// Analyze search interest and discussion for keywords
    Trends {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Compare competitor channels
    Competitors {
        #[arg(required = true)]
        channels: Vec<String>,
    },
    /// Forecast where keywords are heading
    Predict {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

pub(crate) async fn run(studio: &Studio, command: CrewCommands) -> anyhow::Result<()> {
    match command {
        CrewCommands::SmartScript { topic, platform } => print_result(
            studio
                .smart_script(&topic, parse_platform(&platform))
                .await,
        ),
        CrewCommands::Topics { niche, topic } => {
            print_result(studio.find_topics(&niche, topic.as_deref()).await)
        }
        CrewCommands::Research { topic } => print_result(studio.research(&topic).await),
        CrewCommands::Write {
            topic,
            platform,
            research,
        } => print_result(
            studio
                .write_script(&topic, parse_platform(&platform), research.as_deref())
                .await,
        ),
        CrewCommands::Full {
            niche,
            topic,
            platform,
        } => print_result(
            studio
                .full_content(&niche, topic.as_deref(), parse_platform(&platform))
                .await,
        ),
        CrewCommands::Seo { topic } => print_result(studio.seo(&topic).await),
        CrewCommands::Trends { keywords } => print_result(studio.analyze_trends(&keywords).await),
        CrewCommands::Competitors { channels } => {
            print_result(studio.analyze_competitors(&channels).await)
        }
        CrewCommands::Predict { keywords } => print_result(studio.predict_trends(&keywords).await),
    }
}

fn print_result<T: Serialize>(result: Result<T, AgentError>) -> anyhow::Result<()> {
    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => Err(describe_failure(&err)),
    }
}

/// Turn a crew failure into the message the user sees.
///
/// Completed steps from a failed run are printed to stdout first so they
/// are not lost.
pub(crate) fn describe_failure(err: &AgentError) -> anyhow::Error {
    let completed = err.completed_steps();
    if !completed.is_empty() {
        if let Ok(json) = serde_json::to_string_pretty(completed) {
            println!("{json}");
        }
    }

    match err {
        AgentError::SnapshotUnusable { errors } => {
            for error in errors {
                eprintln!("  - {error}");
            }
            anyhow::anyhow!(
                "no real data could be collected; check YOUTUBE_API_KEY and SERP_API_KEY"
            )
        }
        AgentError::GenerationAuth(failure) => anyhow::anyhow!(
            "generation credentials were rejected at step '{}'; check ANTHROPIC_API_KEY",
            failure.failed_step
        ),
        other => anyhow::anyhow!("{other}"),
    }
}
