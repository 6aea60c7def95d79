use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodayError {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Failed to parse request: {0}")]
    Parse(String),

    #[error("Task service request failed: {0}")]
    Upstream(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TodayError {
    fn from(error: reqwest::Error) -> Self {
        TodayError::Http(error.to_string())
    }
}
