#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("completion API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("completion API returned no choices")]
    EmptyResponse,

    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

pub type Result<T, E = LlmError> = std::result::Result<T, E>;
