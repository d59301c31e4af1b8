use thiserror::Error;

/// Failure raised at the generation boundary.
///
/// Transport and endpoint problems are both collapsed into this one type so
/// the orchestrator can match on a single generation-failure condition while
/// still carrying the original cause.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("failed to reach generation endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    #[error("generation endpoint returned no text")]
    EmptyReply,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
