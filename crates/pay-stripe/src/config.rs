//! # Stripe Configuration
//!
//! Configuration management for the Stripe sandbox processor.
//! Secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;

/// Statement descriptors are capped at 22 characters by Stripe
const MAX_DESCRIPTOR_LEN: usize = 22;

/// Stripe processor configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Text shown on the customer's statement
    pub statement_descriptor: Option<String>,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_STATEMENT_DESCRIPTOR`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let statement_descriptor = env::var("STRIPE_STATEMENT_DESCRIPTOR")
            .ok()
            .filter(|d| !d.trim().is_empty());

        let config = Self {
            secret_key,
            statement_descriptor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            statement_descriptor: None,
        }
    }

    /// Builder: set statement descriptor
    pub fn with_statement_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.statement_descriptor = Some(descriptor.into());
        self
    }

    /// Check key format and descriptor length
    pub fn validate(&self) -> Result<(), PaymentError> {
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if let Some(ref descriptor) = self.statement_descriptor {
            if descriptor.chars().count() > MAX_DESCRIPTOR_LEN {
                return Err(PaymentError::Configuration(format!(
                    "statement descriptor must be at most {} characters",
                    MAX_DESCRIPTOR_LEN
                )));
            }
        }

        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }
}
