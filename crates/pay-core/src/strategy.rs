//! # Capability Traits
//!
//! Strategy traits for every collaborator the `PaymentService` depends on.
//!
//! ## Design Pattern
//!
//! Each concern sits behind its own trait so implementations can be swapped
//! without touching the service. Refund and recurring support are optional
//! capabilities: a service is simply built without them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PaymentService                        │
//! └──────────────────────────────────────────────────────────────┘
//!      │            │             │            │            │
//!  Customer /    Payment       Refund      Recurring     Notifier
//!  Payment      Processor    Processor    Processor    (swappable)
//!  Validator                 (optional)   (optional)
//!                                                      TransactionLogger
//! ```

use crate::customer::CustomerData;
use crate::error::PaymentResult;
use crate::payment::{PaymentData, PaymentResponse, RefundResponse};
use std::sync::Arc;

/// Executes one-time charges.
pub trait PaymentProcessor: Send + Sync {
    /// Charge `payment` on behalf of `customer`.
    ///
    /// # Errors
    /// `PaymentError::Processing` when the charge is rejected.
    fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;
}

/// Reverses a prior transaction.
pub trait RefundProcessor: Send + Sync {
    /// Refund the transaction identified by `transaction_id`.
    fn refund_payment(&self, transaction_id: &str) -> PaymentResult<RefundResponse>;
}

/// Establishes recurring charge schedules.
pub trait RecurringPaymentProcessor: Send + Sync {
    fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse>;
}

/// Informs a customer that a payment went through.
pub trait Notifier: Send + Sync {
    /// # Errors
    /// `PaymentError::Notification` when delivery fails.
    fn send_confirmation(&self, customer: &CustomerData) -> PaymentResult<()>;

    /// Channel label ("email", "sms", ...).
    fn channel(&self) -> &'static str;
}

/// Checks customer records before any charge.
pub trait CustomerValidator: Send + Sync {
    fn validate(&self, customer: &CustomerData) -> PaymentResult<()>;
}

/// Checks payment instrument data before any charge.
pub trait PaymentDataValidator: Send + Sync {
    fn validate(&self, payment: &PaymentData) -> PaymentResult<()>;
}

/// Records transaction and refund events.
///
/// Failures surface as `PaymentError::Observability`, never as a
/// transactional error.
pub trait TransactionLogger: Send + Sync {
    fn log_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> PaymentResult<()>;

    fn log_refund(&self, transaction_id: &str, response: &RefundResponse) -> PaymentResult<()>;
}

/// Shared handles (dynamic dispatch). Collaborators may be reused across services.
pub type BoxedPaymentProcessor = Arc<dyn PaymentProcessor>;
pub type BoxedRefundProcessor = Arc<dyn RefundProcessor>;
pub type BoxedRecurringProcessor = Arc<dyn RecurringPaymentProcessor>;
pub type BoxedNotifier = Arc<dyn Notifier>;
pub type BoxedCustomerValidator = Arc<dyn CustomerValidator>;
pub type BoxedPaymentValidator = Arc<dyn PaymentDataValidator>;
pub type BoxedTransactionLogger = Arc<dyn TransactionLogger>;
