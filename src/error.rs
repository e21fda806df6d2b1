use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ChartError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
