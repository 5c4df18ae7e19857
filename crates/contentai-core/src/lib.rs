pub mod app_config;
pub mod config;
pub mod heuristics;
pub mod personas;
pub mod platform;

pub use app_config::{AppConfig, CredentialStatus, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use heuristics::{load_heuristics, HeuristicsConfig, TrendBand};
pub use personas::{load_personas, PersonaConfig, PersonasFile};
pub use platform::Platform;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    FileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
