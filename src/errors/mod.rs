use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    // Parsing errors
    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("No results: {0}")]
    NoResults(String),

    // Summarizer backend errors
    #[error("Summary not available. Please try again later.")]
    SummaryUnavailable,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for NewsdeskError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            NewsdeskError::Http {
                status: status.as_u16(),
                reason: err.to_string(),
            }
        } else if err.is_decode() {
            NewsdeskError::Parse(err.to_string())
        } else {
            NewsdeskError::Network(err.to_string())
        }
    }
}

impl From<summary_api::BackendError> for NewsdeskError {
    fn from(err: summary_api::BackendError) -> Self {
        match err {
            summary_api::BackendError::RequestError(e) => e.into(),
            summary_api::BackendError::Status { status, message } => NewsdeskError::Http {
                status,
                reason: message,
            },
            summary_api::BackendError::MissingSummary => NewsdeskError::SummaryUnavailable,
        }
    }
}

pub type NewsdeskResult<T> = Result<T, NewsdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_status_keeps_server_message() {
        let err: NewsdeskError = summary_api::BackendError::Status {
            status: 400,
            message: "URL is required".to_string(),
        }
        .into();

        assert!(matches!(err, NewsdeskError::Http { status: 400, .. }));
        assert_eq!(err.to_string(), "HTTP error 400: URL is required");
    }

    #[test]
    fn test_missing_summary_maps_to_unavailable() {
        let err: NewsdeskError = summary_api::BackendError::MissingSummary.into();
        assert_eq!(
            err.to_string(),
            "Summary not available. Please try again later."
        );
    }
}
