//! # pay-core
//!
//! Core types, capability traits and the orchestration service for the
//! payment facade.
//!
//! This crate provides:
//! - `PaymentService`, which runs one-time payments, refunds and recurring setup
//! - capability traits for processors, notifiers, validators and loggers
//! - `CustomerData`, `PaymentData` and the processor response types
//! - `select_notifier` for picking a confirmation channel from contact info
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{
//!     select_notifier, BasicCustomerValidator, BasicPaymentValidator, NotifierSettings,
//!     PaymentService, TracingTransactionLogger,
//! };
//! use std::sync::Arc;
//!
//! let notifier = select_notifier(&customer, &NotifierSettings::default())?;
//! let service = PaymentService::new(
//!     processor.clone(),
//!     notifier,
//!     Arc::new(BasicCustomerValidator),
//!     Arc::new(BasicPaymentValidator::new()),
//!     Arc::new(TracingTransactionLogger),
//! )
//! .with_refund_processor(processor);
//!
//! let response = service.process_transaction(&customer, &payment)?;
//! service.process_refund(&response.transaction_id)?;
//! ```

pub mod customer;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod payment;
pub mod service;
pub mod strategy;
pub mod validate;

// Re-exports for convenience
pub use customer::{ContactInfo, CustomerData};
pub use error::{Capability, PaymentError, PaymentResult};
pub use ledger::{InMemoryTransactionLogger, LogEntry, TracingTransactionLogger};
pub use notify::{select_notifier, EmailNotifier, NotifierSettings, SmsNotifier};
pub use payment::{
    BillingInterval, Currency, PaymentData, PaymentResponse, PaymentStatus, RefundResponse,
};
pub use service::PaymentService;
pub use strategy::{
    BoxedCustomerValidator, BoxedNotifier, BoxedPaymentProcessor, BoxedPaymentValidator,
    BoxedRecurringProcessor, BoxedRefundProcessor, BoxedTransactionLogger, CustomerValidator,
    Notifier, PaymentDataValidator, PaymentProcessor, RecurringPaymentProcessor,
    RefundProcessor, TransactionLogger,
};
pub use validate::{BasicCustomerValidator, BasicPaymentValidator};
