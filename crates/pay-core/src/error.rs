//! # Payment Error Types
//!
//! Typed error handling for the payment facade.
//! Every collaborator and every service operation returns `Result<T, PaymentError>`.

use std::fmt;
use thiserror::Error;

/// Optional capability a service configuration may lack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Reversing a prior transaction
    Refund,
    /// Establishing a recurring charge schedule
    Recurring,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Refund => write!(f, "refunds"),
            Capability::Recurring => write!(f, "recurring payments"),
        }
    }
}

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Malformed customer or payment data
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// Processor, refund processor or recurring processor failure
    #[error("Processing error [{provider}]: {message}")]
    Processing { provider: String, message: String },

    /// Notifier failure. The charge has already happened when this surfaces.
    #[error("Notification error [{channel}]: {message}")]
    Notification { channel: String, message: String },

    /// Requested operation is not supported by the current configuration
    #[error("this processor does not support {0}")]
    Capability(Capability),

    /// No notifier strategy could be chosen from the contact info
    #[error("no viable notification strategy: {0}")]
    Selection(String),

    /// Transaction logging failed
    #[error("Observability error: {0}")]
    Observability(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PaymentError {
    /// Shorthand for a validation failure on `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a processor failure reported by `provider`
    pub fn processing(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Processing {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a notifier failure on `channel`
    pub fn notification(channel: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Notification {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Returns true if money may already have moved when this error surfaced.
    pub fn is_transactional(&self) -> bool {
        matches!(
            self,
            PaymentError::Processing { .. } | PaymentError::Notification { .. }
        )
    }

    /// Short stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentError::Validation { .. } => "validation",
            PaymentError::Processing { .. } => "processing",
            PaymentError::Notification { .. } => "notification",
            PaymentError::Capability(_) => "capability",
            PaymentError::Selection(_) => "selection",
            PaymentError::Observability(_) => "observability",
            PaymentError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
