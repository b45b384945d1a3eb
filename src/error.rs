//! Error taxonomy for form submission.

use reqwest::StatusCode;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "All fields are required. Please fill in all fields.";
pub const FAILURE_MESSAGE: &str = "Failed to make prediction. Please try again.";
pub const DECODE_MESSAGE: &str = "Prediction response could not be read. Please try again.";
pub const IN_FLIGHT_MESSAGE: &str = "A prediction is already in progress. Please wait.";

/// A captured field had an empty value. Displays the fixed user message;
/// `field` names the first offender for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError {
    pub field: String,
}

/// Failures between sending the request and holding a parsed body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{}", FAILURE_MESSAGE)]
    Http { status: StatusCode },

    #[error("{}", FAILURE_MESSAGE)]
    Transport { message: String },

    #[error("{}", DECODE_MESSAGE)]
    Decode { message: String },

    #[error("{}", FAILURE_MESSAGE)]
    Encode { message: String },

    #[error("{}", IN_FLIGHT_MESSAGE)]
    InFlight,
}

impl SubmitError {
    /// Underlying error text, when there is more to say than the user message.
    pub fn detail(&self) -> Option<String> {
        match self {
            SubmitError::Http { status } => Some(format!("HTTP {}", status)),
            SubmitError::Transport { message }
            | SubmitError::Decode { message }
            | SubmitError::Encode { message } => Some(message.clone()),
            SubmitError::InFlight => None,
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmitError::Decode { message: err.to_string() }
        } else {
            SubmitError::Transport { message: err.to_string() }
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Encode { message: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("form not found: {id}")]
    FormNotFound { id: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}
