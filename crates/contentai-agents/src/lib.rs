//! Persona-driven content generation grounded in collected data.
//!
//! A [`Studio`] owns the collector, the persona catalog, typed tools, and a
//! [`PipelineRunner`] over a [`GenerationBackend`]. Crews are fixed step
//! sequences run through it. The grounded script crew refuses to generate
//! when collection found nothing.

pub mod backend;
pub mod crews;
pub mod error;
pub mod heuristics;
pub mod models;
pub mod parser;
pub mod persona;
pub mod pipeline;
pub mod prompts;
pub mod studio;
pub mod tools;

pub use backend::{AnthropicBackend, AnthropicConfig, GenerationBackend, GenerationRequest};
pub use crews::{CrewOutput, SmartScriptOutput};
pub use error::{AgentError, GenerationError};
pub use heuristics::{
    EngagementEstimate, EngagementInput, EngagementTier, HashtagSet, PostingPlan,
};
pub use models::OutputSchema;
pub use persona::{Persona, PersonaCatalog, ToolKind};
pub use pipeline::{GenerationStep, PipelineFailure, PipelineOutput, PipelineRunner, StepResult};
pub use studio::Studio;
pub use tools::{ToolBox, ToolRequest};
