use thiserror::Error;

/// Schedule generation errors.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// No API key configured for the text-generation provider.
    #[error("Missing API key for schedule provider")]
    MissingApiKey,

    /// Provider error (transport or API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model reply could not be parsed as a schedule.
    #[error("Failed to parse schedule from model reply: {0}")]
    Parse(String),
}
