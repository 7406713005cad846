// ABOUTME: Custom error types for the PokeAPI SDK with user-friendly messages
// ABOUTME: Separates not-found lookups from transient, decode, and cancellation failures

use std::fmt;
use thiserror::Error;

/// Which upstream resource was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Creature,
    Sprite,
    List,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Creature => write!(f, "Pokemon"),
            Resource::Sprite => write!(f, "Pokemon sprite"),
            Resource::List => write!(f, "Pokemon list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PokeError {
    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: String },

    #[error("Unexpected status code {0} from PokeAPI")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Failed to decode sprite: {0}")]
    Decode(String),

    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    #[error("Batch fetch cancelled after an earlier failure")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

impl PokeError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        PokeError::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PokeError::NotFound { .. })
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            PokeError::NotFound {
                resource: Resource::Creature,
                ..
            } => Some("Check the spelling; names are lowercase (e.g., snorlax, mr-mime)"),
            PokeError::NotFound {
                resource: Resource::Sprite,
                ..
            } => Some("This Pokemon has no sprite for the requested variant"),
            PokeError::Network(_) => Some("Check your internet connection and try again"),
            PokeError::Timeout => Some("Try again or check your network connection"),
            PokeError::Status(code) if *code >= 500 => {
                Some("PokeAPI is having trouble; wait a moment and retry")
            }
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            PokeError::Network(_) | PokeError::Timeout => true,
            PokeError::Status(code) => *code == 429 || (500..=599).contains(code),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for PokeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PokeError::Timeout
        } else if err.is_decode() {
            PokeError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            PokeError::Status(status.as_u16())
        } else {
            PokeError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PokeError {
    fn from(err: serde_json::Error) -> Self {
        PokeError::InvalidResponse(err.to_string())
    }
}

impl From<image::ImageError> for PokeError {
    fn from(err: image::ImageError) -> Self {
        PokeError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PokeError {
    fn from(err: tokio::task::JoinError) -> Self {
        PokeError::TaskFailed(err.to_string())
    }
}
