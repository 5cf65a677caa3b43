use derive_more::Display;
use reqwest::StatusCode;

/// Failures of a single request against the backend.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display("Network error: {}", _0)]
    Network(String),

    #[display("Unauthorized")]
    Unauthorized,

    #[display("Forbidden")]
    Forbidden,

    #[display("{message}")]
    Status { status: u16, message: String },

    #[display("Invalid response body: {}", _0)]
    Decode(String),

    #[display("Invalid URL: {}", _0)]
    InvalidUrl(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Maps a non-success status to an error, keeping `message` as the
    /// caller-facing description of what failed.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            _ => ApiError::Status {
                status: status.as_u16(),
                message: message.into(),
            },
        }
    }

    /// True for the statuses the backend uses to say "no usable session".
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}
