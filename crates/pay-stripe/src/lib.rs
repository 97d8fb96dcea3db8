//! # pay-stripe
//!
//! Stripe-style processor for the payment facade.
//!
//! `StripeSandboxProcessor` implements all three processor capabilities
//! (charge, refund, recurring) without leaving the process. A single instance
//! can back all three slots of a `PaymentService`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeSandboxProcessor;
//! use std::sync::Arc;
//!
//! // Create processor from environment
//! let stripe = Arc::new(StripeSandboxProcessor::from_env()?);
//!
//! let service = PaymentService::new(stripe.clone(), notifier, customers, payments, logger)
//!     .with_refund_processor(stripe.clone())
//!     .with_recurring_processor(stripe);
//! ```

pub mod config;
pub mod sandbox;

// Re-exports
pub use config::StripeConfig;
pub use sandbox::{StripeSandboxProcessor, TOKEN_DECLINED, TOKEN_VISA};
