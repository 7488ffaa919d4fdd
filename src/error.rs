// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.

use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Error type shared by the API client and the stores.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure (connection refused, DNS, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401. Stored credentials have already been cleared.
    #[error("Authentication required")]
    Unauthorized(Option<String>),

    /// Any other non-2xx answer.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client-side form validation failed; nothing was sent.
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    /// Message suitable for showing to the user, if the error carries one.
    ///
    /// Forms fall back to a localized generic message when this is `None`.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ClientError::Unauthorized(Some(detail)) => Some(detail.clone()),
            ClientError::Api { message, .. } if !message.trim().is_empty() => {
                Some(message.clone())
            }
            ClientError::UnsupportedLanguage(_) => Some(self.to_string()),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
