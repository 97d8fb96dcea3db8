//! # pay-demo
//!
//! Wiring for the payment facade demo.
//!
//! This crate provides:
//! - `DemoConfig`, loaded from environment variables
//! - the customer fixture loader for `config/customer.toml`
//! - `DemoState`, which builds a `PaymentService` on the Stripe sandbox and
//!   runs a charge, a refund and a recurring setup

pub mod config;
pub mod state;

pub use config::{load_customer, DemoConfig};
pub use state::{DemoReport, DemoState};
