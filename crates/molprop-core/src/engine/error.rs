use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid structure notation '{notation}': {source}")]
    InvalidStructure {
        notation: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Degenerate regression: {0}")]
    DegenerateFit(String),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
