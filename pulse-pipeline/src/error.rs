use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures that abort a pipeline run.
///
/// Malformed field values never show up here; the cleaner substitutes
/// defaults for those instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

impl PipelineError {
    pub fn invalid_setting(key: &'static str, reason: impl Into<String>) -> Self {
        PipelineError::InvalidSetting {
            key,
            reason: reason.into(),
        }
    }
}
