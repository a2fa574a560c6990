//! # Payment Error Types
//!
//! Typed error handling for the checkout flow.
//! Every fallible step returns `Result<T, PaymentError>`; the
//! `CheckoutInitiator` collapses them into an error-redirect at the boundary.

use thiserror::Error;

/// Message shown when no authenticated user could be resolved
pub const SESSION_ERROR_MESSAGE: &str = "Could not get user session.";

/// Message shown when the gateway could not be reached or understood
pub const GATEWAY_UNAVAILABLE_MESSAGE: &str = "Unable to initialize payment.";

/// Message shown for everything else
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Coarse classification of a checkout failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable user session
    Auth,
    /// The payment provider rejected the request
    Gateway,
    /// Anything else (network, storage, malformed payloads)
    Unknown,
}

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The session provider returned no user
    #[error("No authenticated user")]
    Unauthenticated,

    /// The session provider itself failed
    #[error("Session error: {0}")]
    Session(String),

    /// Payment provider answered with a falsy status
    #[error("Provider error [{provider}]: {message}")]
    Gateway { provider: String, message: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Customer store failure
    #[error("Customer store error: {0}")]
    Store(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Shorthand for a gateway rejection
    pub fn gateway(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Gateway {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Unauthenticated | PaymentError::Session(_) => ErrorKind::Auth,
            PaymentError::Gateway { .. } => ErrorKind::Gateway,
            _ => ErrorKind::Unknown,
        }
    }

    /// The message safe to show an end user.
    ///
    /// Gateway rejections carry the provider's own wording; transport and
    /// storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Unauthenticated | PaymentError::Session(_) => {
                SESSION_ERROR_MESSAGE.to_string()
            }
            PaymentError::Gateway { message, .. } if !message.trim().is_empty() => message.clone(),
            PaymentError::Gateway { .. }
            | PaymentError::Network(_)
            | PaymentError::Serialization(_) => GATEWAY_UNAVAILABLE_MESSAGE.to_string(),
            PaymentError::InvalidRequest(message) => message.clone(),
            PaymentError::Store(_) | PaymentError::Configuration(_) | PaymentError::Internal(_) => {
                UNKNOWN_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PaymentError::Unauthenticated.kind(), ErrorKind::Auth);
        assert_eq!(PaymentError::Session("expired".into()).kind(), ErrorKind::Auth);
        assert_eq!(
            PaymentError::gateway("paystack", "Insufficient plan").kind(),
            ErrorKind::Gateway
        );
        assert_eq!(PaymentError::Network("timeout".into()).kind(), ErrorKind::Unknown);
        assert_eq!(PaymentError::Store("down".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            PaymentError::Session("jwt expired".into()).user_message(),
            "Could not get user session."
        );
        assert_eq!(
            PaymentError::gateway("paystack", "Insufficient plan").user_message(),
            "Insufficient plan"
        );
        assert_eq!(
            PaymentError::gateway("paystack", "  ").user_message(),
            "Unable to initialize payment."
        );
        assert_eq!(
            PaymentError::Network("connection reset".into()).user_message(),
            "Unable to initialize payment."
        );
        assert_eq!(
            PaymentError::Internal("boom".into()).user_message(),
            "An unknown error occurred."
        );
    }
}
