//! Heuristic commands. These never call the generation backend.

use clap::Subcommand;
use contentai_agents::{EngagementInput, Studio};

use crate::parse_platform;

#[derive(Debug, Subcommand)]
pub enum HeuristicCommands {
    /// Estimate an engagement-rate range for planned content
    Engagement {
        topic: String,
        #[arg(long, default_value = "youtube")]
        platform: String,
        #[arg(long, default_value = "")]
        niche: String,
        /// The content has no strong hook
        #[arg(long)]
        no_hook: bool,
        /// The content has no visual elements
        #[arg(long)]
        no_visuals: bool,
        /// Planned duration in seconds
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Recommend when to post
    PostingTime {
        #[arg(long, default_value = "youtube")]
        platform: String,
        #[arg(long, default_value = "")]
        niche: String,
        /// Audience location, e.g. US, Europe, Asia
        #[arg(long, default_value = "US")]
        audience: String,
        #[arg(long)]
        json: bool,
    },
    /// Suggest hashtags seeded with real rising search queries
    Hashtags {
        topic: String,
        #[arg(long, default_value = "youtube")]
        platform: String,
        #[arg(long, default_value = "")]
        niche: String,
        #[arg(long)]
        json: bool,
    },
}

pub(crate) async fn run(studio: &Studio, command: HeuristicCommands) -> anyhow::Result<()> {
    match command {
        HeuristicCommands::Engagement {
            topic,
            platform,
            niche,
            no_hook,
            no_visuals,
            duration,
            json,
        } => {
            let mut input = EngagementInput::new(topic, parse_platform(&platform));
            input.niche = niche;
            input.has_hook = !no_hook;
            input.has_visuals = !no_visuals;
            input.duration_secs = duration;
            let estimate = studio.engagement(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                println!("{estimate}");
            }
        }
        HeuristicCommands::PostingTime {
            platform,
            niche,
            audience,
            json,
        } => {
            let plan = studio.posting_time(parse_platform(&platform), &niche, &audience);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{plan}");
            }
        }
        HeuristicCommands::Hashtags {
            topic,
            platform,
            niche,
            json,
        } => {
            let set = studio
                .hashtags(&topic, &niche, parse_platform(&platform))
                .await;
            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                println!("{set}");
            }
        }
    }
    Ok(())
}
