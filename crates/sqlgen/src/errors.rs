#[derive(Debug, thiserror::Error)]
pub enum SqlGenError {
    #[error("failed to read schema file '{path}': {source}")]
    SchemaFile {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Backend(#[from] llm::errors::LlmError),
}

pub type Result<T, E = SqlGenError> = std::result::Result<T, E>;
