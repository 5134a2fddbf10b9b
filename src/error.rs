//! Error handling for the resume desk client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeDeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unexpected response from backend: {0}")]
    UnexpectedResponse(String),

    #[error("Not authorized (role: {}), redirecting to /login", .role.as_deref().unwrap_or("none"))]
    Unauthorized { role: Option<String> },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeDeskError>;

impl ResumeDeskError {
    /// Message suitable for showing to the person at the terminal.
    pub fn user_message(&self) -> String {
        match self {
            ResumeDeskError::Network(_) => {
                "Cannot connect to the server. Please check if the backend is running.".to_string()
            }
            ResumeDeskError::Http { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            ResumeDeskError::Http { status, .. } => {
                format!("Request failed with status {}", status)
            }
            ResumeDeskError::Backend(detail) => detail.clone(),
            ResumeDeskError::UnexpectedResponse(_) => {
                "Unexpected response from server. Please try again.".to_string()
            }
            ResumeDeskError::Unauthorized { .. } => {
                "You are not signed in with the required role. Run `resume-desk login` first."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    /// True when the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, ResumeDeskError::Network(_))
    }
}

/// Convert reqwest errors into our error taxonomy
impl From<reqwest::Error> for ResumeDeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ResumeDeskError::UnexpectedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ResumeDeskError::Http {
                status: status.as_u16(),
                detail: err.to_string(),
            }
        } else {
            ResumeDeskError::Network(err.to_string())
        }
    }
}
