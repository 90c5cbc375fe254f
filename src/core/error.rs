use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline failed: {0}")]
    Pipeline(String),

    #[error("Health check failed: {0}")]
    HealthCheck(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Pipeline(_) => "PIPELINE_FAILED",
            Error::HealthCheck(_) => "HEALTH_CHECK_FAILED",
            Error::Publish(_) => "PUBLISH_FAILED",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
