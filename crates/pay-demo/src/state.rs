//! # Demo State
//!
//! Builds a `PaymentService` around the Stripe sandbox processor and runs the
//! three use cases against it.

use crate::config::DemoConfig;
use pay_core::{
    select_notifier, BasicCustomerValidator, BasicPaymentValidator, BoxedNotifier,
    BoxedTransactionLogger, CustomerData, PaymentData, PaymentResponse, PaymentService,
    RefundResponse, TracingTransactionLogger,
};
use pay_stripe::StripeSandboxProcessor;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Everything the demo needs, wired together
pub struct DemoState {
    pub service: PaymentService,
    pub customer: CustomerData,
    pub config: DemoConfig,
    /// Notifier chosen from the customer's contact info
    pub selected_notifier: BoxedNotifier,
}

impl DemoState {
    /// Wire a service that logs through tracing
    pub fn new(config: DemoConfig, customer: CustomerData) -> anyhow::Result<Self> {
        Self::with_logger(config, customer, Arc::new(TracingTransactionLogger::new()))
    }

    /// Wire a service with a caller-supplied transaction logger
    pub fn with_logger(
        config: DemoConfig,
        customer: CustomerData,
        logger: BoxedTransactionLogger,
    ) -> anyhow::Result<Self> {
        let selected_notifier = select_notifier(&customer, &config.notifier)?;
        info!("Selected {} notifier for {}", selected_notifier.channel(), customer.name);

        let stripe = Arc::new(StripeSandboxProcessor::new(config.stripe.clone())?);

        let service = PaymentService::new(
            stripe.clone(),
            selected_notifier.clone(),
            Arc::new(BasicCustomerValidator::new()),
            Arc::new(BasicPaymentValidator::new()),
            logger,
        )
        .with_refund_processor(stripe.clone())
        .with_recurring_processor(stripe);

        Ok(Self {
            service,
            customer,
            config,
            selected_notifier,
        })
    }

    /// Payment built from the configured amount, currency and source
    pub fn payment(&self) -> PaymentData {
        PaymentData::new(self.config.amount, self.config.currency, &self.config.source)
            .with_description("payment-demo")
    }

    /// Swap to email, then to SMS. SMS stays active afterwards.
    pub fn exercise_notifier_swaps(&mut self) {
        self.service
            .set_notifier(Arc::new(self.config.notifier.email_notifier()));
        self.service
            .set_notifier(Arc::new(self.config.notifier.sms_notifier()));
    }

    /// Charge, refund the charge and set up a recurring payment with the
    /// selected notifier, then run the notifier swaps.
    pub fn run(&mut self) -> anyhow::Result<DemoReport> {
        let payment = self.payment();
        let charge = self.service.process_transaction(&self.customer, &payment)?;
        let refund = self.service.process_refund(&charge.transaction_id)?;

        let recurring_payment = payment.with_interval(self.config.interval);
        let recurring = self
            .service
            .setup_recurring(&self.customer, &recurring_payment)?;

        let confirmed_by = self.service.notifier_channel();
        self.exercise_notifier_swaps();

        Ok(DemoReport {
            confirmed_by,
            notifier: self.service.notifier_channel(),
            charge,
            refund,
            recurring,
        })
    }
}

/// Responses produced by one demo run
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Channel that confirmed the charge
    pub confirmed_by: &'static str,
    /// Channel active after the swaps
    pub notifier: &'static str,
    pub charge: PaymentResponse,
    pub refund: RefundResponse,
    pub recurring: PaymentResponse,
}
