use std::path::PathBuf;

/// Why the model-backed generation path did not produce a phrase.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("generation service returned no text")]
    EmptyResponse,
    #[error("malformed generation output: {0:?}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
