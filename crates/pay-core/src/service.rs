//! # Payment Service
//!
//! Orchestrates validators, the processor, the notifier and the logger into
//! three use cases: one-time payment, refund and recurring setup.
//!
//! Every step runs in strict sequence and the first failure aborts the call.
//! There are no compensating actions: if the notifier fails after a charge,
//! the charge stands and the error is returned to the caller.

use crate::customer::CustomerData;
use crate::error::{Capability, PaymentError, PaymentResult};
use crate::payment::{PaymentData, PaymentResponse, RefundResponse};
use crate::strategy::{
    BoxedCustomerValidator, BoxedNotifier, BoxedPaymentProcessor, BoxedPaymentValidator,
    BoxedRecurringProcessor, BoxedRefundProcessor, BoxedTransactionLogger,
};
use tracing::{debug, info, instrument, warn};

/// Payment orchestration facade
pub struct PaymentService {
    payment_processor: BoxedPaymentProcessor,
    notifier: BoxedNotifier,
    customer_validator: BoxedCustomerValidator,
    payment_validator: BoxedPaymentValidator,
    logger: BoxedTransactionLogger,
    refund_processor: Option<BoxedRefundProcessor>,
    recurring_processor: Option<BoxedRecurringProcessor>,
}

impl PaymentService {
    /// Create a service with the required collaborators and no optional capabilities
    pub fn new(
        payment_processor: BoxedPaymentProcessor,
        notifier: BoxedNotifier,
        customer_validator: BoxedCustomerValidator,
        payment_validator: BoxedPaymentValidator,
        logger: BoxedTransactionLogger,
    ) -> Self {
        Self {
            payment_processor,
            notifier,
            customer_validator,
            payment_validator,
            logger,
            refund_processor: None,
            recurring_processor: None,
        }
    }

    /// Builder: enable refunds
    pub fn with_refund_processor(mut self, processor: BoxedRefundProcessor) -> Self {
        self.refund_processor = Some(processor);
        self
    }

    /// Builder: enable recurring payments
    pub fn with_recurring_processor(mut self, processor: BoxedRecurringProcessor) -> Self {
        self.recurring_processor = Some(processor);
        self
    }

    /// Replace the active notifier
    pub fn set_notifier(&mut self, notifier: BoxedNotifier) {
        info!(
            from = self.notifier.channel(),
            to = notifier.channel(),
            "Changing the notifier implementation"
        );
        self.notifier = notifier;
    }

    /// Channel of the active notifier
    pub fn notifier_channel(&self) -> &'static str {
        self.notifier.channel()
    }

    pub fn supports_refunds(&self) -> bool {
        self.refund_processor.is_some()
    }

    pub fn supports_recurring(&self) -> bool {
        self.recurring_processor.is_some()
    }

    /// Validate, charge, notify, log.
    ///
    /// Every response the processor returns without error is confirmed to the
    /// customer and logged, whatever its status.
    #[instrument(skip_all, fields(customer = %customer.name, provider = self.payment_processor.provider_name()))]
    pub fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse> {
        self.validate(customer, payment)?;

        debug!("Charging {}", payment.display_amount());
        let response = self
            .payment_processor
            .process_transaction(customer, payment)?;

        if !response.is_success() {
            warn!(
                transaction_id = %response.transaction_id,
                status = ?response.status,
                "Processor returned a non-success status"
            );
        }

        self.notifier.send_confirmation(customer).map_err(|e| {
            warn!(
                transaction_id = %response.transaction_id,
                kind = e.kind(),
                "Notification failed after charge: {}", e
            );
            e
        })?;

        self.logger
            .log_transaction(customer, payment, &response)
            .map_err(|e| {
                warn!(
                    transaction_id = %response.transaction_id,
                    kind = e.kind(),
                    "Transaction log failed after charge: {}", e
                );
                e
            })?;

        info!(transaction_id = %response.transaction_id, "Transaction processed");
        Ok(response)
    }

    /// Refund a previously issued transaction
    ///
    /// # Errors
    /// `PaymentError::Capability` if no refund processor is configured.
    #[instrument(skip(self))]
    pub fn process_refund(&self, transaction_id: &str) -> PaymentResult<RefundResponse> {
        let processor = self
            .refund_processor
            .as_ref()
            .ok_or(PaymentError::Capability(Capability::Refund))?;

        let response = processor.refund_payment(transaction_id)?;
        self.logger.log_refund(transaction_id, &response)?;

        info!(refund_id = %response.refund_id, "Refund processed");
        Ok(response)
    }

    /// Set up a recurring charge schedule. Inputs are validated the same way
    /// as in `process_transaction`; no confirmation is sent.
    ///
    /// # Errors
    /// `PaymentError::Capability` if no recurring processor is configured.
    #[instrument(skip_all, fields(customer = %customer.name, interval = ?payment.interval))]
    pub fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse> {
        let processor = self
            .recurring_processor
            .as_ref()
            .ok_or(PaymentError::Capability(Capability::Recurring))?;

        self.validate(customer, payment)?;

        let response = processor.setup_recurring_payment(customer, payment)?;
        self.logger.log_transaction(customer, payment, &response)?;

        info!(transaction_id = %response.transaction_id, "Recurring payment set up");
        Ok(response)
    }

    fn validate(&self, customer: &CustomerData, payment: &PaymentData) -> PaymentResult<()> {
        self.customer_validator.validate(customer)?;
        self.payment_validator.validate(payment)
    }
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("provider", &self.payment_processor.provider_name())
            .field("notifier", &self.notifier.channel())
            .field("refunds", &self.supports_refunds())
            .field("recurring", &self.supports_recurring())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::ContactInfo;
    use crate::ledger::{InMemoryTransactionLogger, LogEntry};
    use crate::payment::{BillingInterval, Currency, PaymentStatus};
    use crate::strategy::{
        CustomerValidator, Notifier, PaymentDataValidator, PaymentProcessor,
        RecurringPaymentProcessor, RefundProcessor, TransactionLogger,
    };
    use crate::validate::{BasicCustomerValidator, BasicPaymentValidator};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // -------------------------------------------------------------------------
    // Spies
    // -------------------------------------------------------------------------

    struct SpyProcessor {
        calls: AtomicUsize,
        status: PaymentStatus,
        fail: bool,
    }

    impl SpyProcessor {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status: PaymentStatus::Succeeded,
                fail: false,
            })
        }

        fn with_status(status: PaymentStatus) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status,
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                status: PaymentStatus::Failed,
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PaymentProcessor for SpyProcessor {
        fn process_transaction(
            &self,
            _customer: &CustomerData,
            payment: &PaymentData,
        ) -> PaymentResult<PaymentResponse> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PaymentError::processing("spy", "card declined"));
            }
            Ok(PaymentResponse::new(self.status, format!("txn_{}", n), payment))
        }

        fn provider_name(&self) -> &'static str {
            "spy"
        }
    }

    impl RefundProcessor for SpyProcessor {
        fn refund_payment(&self, transaction_id: &str) -> PaymentResult<RefundResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PaymentError::processing("spy", "unknown transaction"));
            }
            Ok(RefundResponse::new("re_1", transaction_id, PaymentStatus::Succeeded))
        }
    }

    impl RecurringPaymentProcessor for SpyProcessor {
        fn setup_recurring_payment(
            &self,
            _customer: &CustomerData,
            payment: &PaymentData,
        ) -> PaymentResult<PaymentResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PaymentResponse::new(PaymentStatus::Pending, "sub_1", payment))
        }
    }

    struct SpyNotifier {
        channel: &'static str,
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl SpyNotifier {
        fn new(channel: &'static str) -> Arc<Self> {
            Arc::new(Self {
                channel,
                sent: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing(channel: &'static str) -> Arc<Self> {
            Arc::new(Self {
                channel,
                sent: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for SpyNotifier {
        fn send_confirmation(&self, customer: &CustomerData) -> PaymentResult<()> {
            self.sent.lock().unwrap().push(customer.name.clone());
            if self.fail {
                return Err(PaymentError::notification(self.channel, "gateway down"));
            }
            Ok(())
        }

        fn channel(&self) -> &'static str {
            self.channel
        }
    }

    struct RejectAll;

    impl CustomerValidator for RejectAll {
        fn validate(&self, _customer: &CustomerData) -> PaymentResult<()> {
            Err(PaymentError::validation("customer", "rejected"))
        }
    }

    impl PaymentDataValidator for RejectAll {
        fn validate(&self, _payment: &PaymentData) -> PaymentResult<()> {
            Err(PaymentError::validation("payment", "rejected"))
        }
    }

    struct FailingLogger;

    impl TransactionLogger for FailingLogger {
        fn log_transaction(
            &self,
            _customer: &CustomerData,
            _payment: &PaymentData,
            _response: &PaymentResponse,
        ) -> PaymentResult<()> {
            Err(PaymentError::Observability("log sink unavailable".to_string()))
        }

        fn log_refund(&self, _transaction_id: &str, _response: &RefundResponse) -> PaymentResult<()> {
            Err(PaymentError::Observability("log sink unavailable".to_string()))
        }
    }

    struct Harness {
        processor: Arc<SpyProcessor>,
        notifier: Arc<SpyNotifier>,
        logger: Arc<InMemoryTransactionLogger>,
    }

    impl Harness {
        fn new(processor: Arc<SpyProcessor>) -> Self {
            Self {
                processor,
                notifier: SpyNotifier::new("email"),
                logger: Arc::new(InMemoryTransactionLogger::new()),
            }
        }

        fn service(&self) -> PaymentService {
            PaymentService::new(
                self.processor.clone(),
                self.notifier.clone(),
                Arc::new(BasicCustomerValidator),
                Arc::new(BasicPaymentValidator::new()),
                self.logger.clone(),
            )
        }

        fn service_with_failing_logger(&self) -> PaymentService {
            PaymentService::new(
                self.processor.clone(),
                self.notifier.clone(),
                Arc::new(BasicCustomerValidator),
                Arc::new(BasicPaymentValidator::new()),
                Arc::new(FailingLogger),
            )
            .with_refund_processor(self.processor.clone())
            .with_recurring_processor(self.processor.clone())
        }

        fn full_service(&self) -> PaymentService {
            self.service()
                .with_refund_processor(self.processor.clone())
                .with_recurring_processor(self.processor.clone())
        }
    }

    fn customer() -> CustomerData {
        CustomerData::new("Jon Doe", ContactInfo::new().with_email("jon.doe@mail.co"))
    }

    fn payment() -> PaymentData {
        PaymentData::new(2500, Currency::USD, "tok_visa")
    }

    // -------------------------------------------------------------------------
    // process_transaction
    // -------------------------------------------------------------------------

    #[test]
    fn test_invalid_customer_skips_processor() {
        let h = Harness::new(SpyProcessor::succeeding());
        let bad = CustomerData::new("", ContactInfo::new());

        let err = h.service().process_transaction(&bad, &payment()).unwrap_err();

        assert!(matches!(err, PaymentError::Validation { .. }));
        assert_eq!(h.processor.calls(), 0);
        assert!(h.notifier.sent().is_empty());
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_invalid_payment_skips_processor() {
        let h = Harness::new(SpyProcessor::succeeding());
        let bad = PaymentData::new(0, Currency::USD, "tok_visa");

        let err = h.service().process_transaction(&customer(), &bad).unwrap_err();

        assert!(matches!(err, PaymentError::Validation { ref field, .. } if field == "amount"));
        assert_eq!(h.processor.calls(), 0);
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_customer_validated_before_payment() {
        let h = Harness::new(SpyProcessor::succeeding());
        let service = PaymentService::new(
            h.processor.clone(),
            h.notifier.clone(),
            Arc::new(RejectAll),
            Arc::new(RejectAll),
            h.logger.clone(),
        );

        let err = service.process_transaction(&customer(), &payment()).unwrap_err();
        assert!(matches!(err, PaymentError::Validation { ref field, .. } if field == "customer"));
    }

    #[test]
    fn test_success_returns_response_and_logs_once() {
        let h = Harness::new(SpyProcessor::succeeding());
        let customer = customer();
        let payment = payment();

        let response = h.service().process_transaction(&customer, &payment).unwrap();

        assert_eq!(response.status, PaymentStatus::Succeeded);
        assert_eq!(response.transaction_id, "txn_0");
        assert_eq!(h.processor.calls(), 1);
        assert_eq!(h.notifier.sent(), vec!["Jon Doe".to_string()]);

        let entries = h.logger.entries().unwrap();
        assert_eq!(entries.len(), 1);
        match &entries[0] {
            LogEntry::Transaction {
                customer: c,
                payment: p,
                response: r,
                ..
            } => {
                assert_eq!(c, &customer);
                assert_eq!(p, &payment);
                assert_eq!(r, &response);
            }
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_processor_error_propagates_without_notify_or_log() {
        let h = Harness::new(SpyProcessor::failing());

        let err = h
            .service()
            .process_transaction(&customer(), &payment())
            .unwrap_err();

        assert!(matches!(err, PaymentError::Processing { .. }));
        assert_eq!(h.processor.calls(), 1);
        assert!(h.notifier.sent().is_empty());
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_failed_status_still_notifies_and_logs() {
        let h = Harness::new(SpyProcessor::with_status(PaymentStatus::Failed));

        let response = h
            .service()
            .process_transaction(&customer(), &payment())
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(h.notifier.sent().len(), 1);
        assert_eq!(h.logger.len().unwrap(), 1);
    }

    #[test]
    fn test_notifier_failure_propagates_after_charge() {
        let h = Harness::new(SpyProcessor::succeeding());
        let mut service = h.service();
        let broken = SpyNotifier::failing("sms");
        service.set_notifier(broken.clone());

        let err = service
            .process_transaction(&customer(), &payment())
            .unwrap_err();

        assert!(matches!(err, PaymentError::Notification { .. }));
        assert!(err.is_transactional());
        assert_eq!(h.processor.calls(), 1);
        assert_eq!(broken.sent().len(), 1);
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_set_notifier_takes_effect_immediately() {
        let h = Harness::new(SpyProcessor::succeeding());
        let mut service = h.service();
        let replacement = SpyNotifier::new("sms");

        service.set_notifier(replacement.clone());
        assert_eq!(service.notifier_channel(), "sms");

        service.process_transaction(&customer(), &payment()).unwrap();

        assert_eq!(replacement.sent().len(), 1);
        assert!(h.notifier.sent().is_empty());
    }

    // -------------------------------------------------------------------------
    // process_refund
    // -------------------------------------------------------------------------

    #[test]
    fn test_refund_without_capability() {
        let h = Harness::new(SpyProcessor::succeeding());
        let service = h.service();

        assert!(!service.supports_refunds());
        let err = service.process_refund("txn_123").unwrap_err();

        assert!(matches!(err, PaymentError::Capability(Capability::Refund)));
        assert_eq!(err.to_string(), "this processor does not support refunds");
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_refund_logs_keyed_entry() {
        let h = Harness::new(SpyProcessor::succeeding());
        let service = h.full_service();

        let response = service.process_refund("txn_123").unwrap();

        assert_eq!(response.transaction_id, "txn_123");
        let entries = h.logger.entries().unwrap();
        assert_eq!(entries.len(), 1);
        match &entries[0] {
            LogEntry::Refund {
                transaction_id,
                response: logged,
                ..
            } => {
                assert_eq!(transaction_id, "txn_123");
                assert_eq!(logged, &response);
            }
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_refund_processor_error_propagates() {
        let h = Harness::new(SpyProcessor::failing());
        let service = h.full_service();

        let err = service.process_refund("txn_404").unwrap_err();

        assert!(matches!(err, PaymentError::Processing { .. }));
        assert!(h.logger.is_empty().unwrap());
    }

    // -------------------------------------------------------------------------
    // setup_recurring
    // -------------------------------------------------------------------------

    #[test]
    fn test_recurring_without_capability() {
        let h = Harness::new(SpyProcessor::succeeding());

        let err = h
            .service()
            .setup_recurring(&customer(), &payment())
            .unwrap_err();

        assert!(matches!(err, PaymentError::Capability(Capability::Recurring)));
        assert_eq!(h.processor.calls(), 0);
        assert!(h.logger.is_empty().unwrap());
    }

    #[test]
    fn test_recurring_logs_transaction_without_confirmation() {
        let h = Harness::new(SpyProcessor::succeeding());
        let monthly = payment().with_interval(BillingInterval::Monthly);

        let response = h
            .full_service()
            .setup_recurring(&customer(), &monthly)
            .unwrap();

        assert_eq!(response.status, PaymentStatus::Pending);
        assert_eq!(h.logger.len().unwrap(), 1);
        assert!(h.notifier.sent().is_empty());
    }

    #[test]
    fn test_recurring_validates_inputs() {
        let h = Harness::new(SpyProcessor::succeeding());
        let bad = PaymentData::new(-1, Currency::USD, "tok_visa");

        let err = h
            .full_service()
            .setup_recurring(&customer(), &bad)
            .unwrap_err();

        assert!(matches!(err, PaymentError::Validation { .. }));
        assert_eq!(h.processor.calls(), 0);
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let h = Harness::new(SpyProcessor::succeeding());
        let rendered = format!("{:?}", h.full_service());

        assert!(rendered.contains("provider: \"spy\""));
        assert!(rendered.contains("refunds: true"));
    }

    // -------------------------------------------------------------------------
    // logger failures
    // -------------------------------------------------------------------------

    #[test]
    fn test_log_failure_after_charge_is_observability_error() {
        let h = Harness::new(SpyProcessor::succeeding());

        let err = h
            .service_with_failing_logger()
            .process_transaction(&customer(), &payment())
            .unwrap_err();

        assert!(matches!(err, PaymentError::Observability(_)));
        assert!(!err.is_transactional());
        assert_eq!(h.processor.calls(), 1);
        assert_eq!(h.notifier.sent().len(), 1);
    }

    #[test]
    fn test_log_failure_after_refund_is_observability_error() {
        let h = Harness::new(SpyProcessor::succeeding());

        let err = h
            .service_with_failing_logger()
            .process_refund("txn_123")
            .unwrap_err();

        assert!(matches!(err, PaymentError::Observability(_)));
        assert_eq!(h.processor.calls(), 1);
    }

    #[test]
    fn test_log_failure_after_recurring_setup_is_observability_error() {
        let h = Harness::new(SpyProcessor::succeeding());
        let monthly = payment().with_interval(BillingInterval::Monthly);

        let err = h
            .service_with_failing_logger()
            .setup_recurring(&customer(), &monthly)
            .unwrap_err();

        assert!(matches!(err, PaymentError::Observability(_)));
        assert_eq!(h.processor.calls(), 1);
        assert!(h.notifier.sent().is_empty());
    }
}
