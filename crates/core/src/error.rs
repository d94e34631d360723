use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Upstream fetch error: {0}")]
    UpstreamFetch(String),

    #[error("Computation error for campaign {campaign_id}: {message}")]
    Computation {
        campaign_id: String,
        message: String,
    },

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
