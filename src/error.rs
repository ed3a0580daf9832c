use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Dom(String),
    #[error("invalid counter configuration: {0}")]
    CounterConfig(#[from] serde_json::Error),
}

impl SiteError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
