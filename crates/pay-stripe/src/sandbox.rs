//! # Stripe Sandbox Processor
//!
//! Processor that mimics Stripe's charge, refund and subscription behaviour
//! entirely in process. It recognises Stripe's documented test tokens, so a
//! charge against `tok_chargeDeclined` is declined just as it would be in
//! Stripe test mode.

use crate::config::StripeConfig;
use pay_core::{
    CustomerData, PaymentData, PaymentError, PaymentProcessor, PaymentResponse, PaymentResult,
    PaymentStatus, RecurringPaymentProcessor, RefundProcessor, RefundResponse,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Test token that always succeeds
pub const TOKEN_VISA: &str = "tok_visa";
/// Test token that is always declined
pub const TOKEN_DECLINED: &str = "tok_chargeDeclined";

#[derive(Debug, Clone)]
struct ChargeRecord {
    amount: i64,
    refunded: bool,
}

/// Stripe-style processor with the refund and recurring capabilities
#[derive(Debug)]
pub struct StripeSandboxProcessor {
    config: StripeConfig,
    charges: Mutex<HashMap<String, ChargeRecord>>,
}

impl StripeSandboxProcessor {
    /// Create a sandbox processor. Only test keys are accepted.
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        config.validate()?;
        if !config.is_test_mode() {
            return Err(PaymentError::Configuration(
                "the sandbox processor only accepts sk_test_ keys".to_string(),
            ));
        }

        Ok(Self {
            config,
            charges: Mutex::new(HashMap::new()),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    /// Number of charges issued so far
    pub fn charge_count(&self) -> usize {
        self.charges.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn charges(&self) -> PaymentResult<std::sync::MutexGuard<'_, HashMap<String, ChargeRecord>>> {
        self.charges
            .lock()
            .map_err(|_| PaymentError::processing(PROVIDER, "charge ledger poisoned"))
    }

    fn check_source(payment: &PaymentData) -> PaymentResult<()> {
        if payment.source == TOKEN_DECLINED {
            warn!(source = %payment.source, "Card declined");
            return Err(PaymentError::processing(PROVIDER, "Your card was declined."));
        }
        Ok(())
    }

    fn descriptor_suffix(&self) -> String {
        self.config
            .statement_descriptor
            .as_ref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default()
    }
}

/// Stripe-looking identifier, e.g. `ch_3f2a...`
fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

impl PaymentProcessor for StripeSandboxProcessor {
    #[instrument(skip_all, fields(customer = %customer.name, amount = payment.amount))]
    fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse> {
        Self::check_source(payment)?;

        let charge_id = new_id("ch");
        self.charges()?.insert(
            charge_id.clone(),
            ChargeRecord {
                amount: payment.amount,
                refunded: false,
            },
        );

        info!(charge_id = %charge_id, "Created Stripe charge");

        Ok(
            PaymentResponse::new(PaymentStatus::Succeeded, charge_id, payment).with_message(
                format!(
                    "Charged {} to {}{}",
                    payment.display_amount(),
                    customer.name,
                    self.descriptor_suffix()
                ),
            ),
        )
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

impl RefundProcessor for StripeSandboxProcessor {
    #[instrument(skip(self))]
    fn refund_payment(&self, transaction_id: &str) -> PaymentResult<RefundResponse> {
        let mut charges = self.charges()?;

        let charge = charges.get_mut(transaction_id).ok_or_else(|| {
            PaymentError::processing(PROVIDER, format!("No such charge: '{}'", transaction_id))
        })?;

        if charge.refunded {
            return Err(PaymentError::processing(
                PROVIDER,
                format!("Charge {} has already been refunded.", transaction_id),
            ));
        }
        charge.refunded = true;

        let refund_id = new_id("re");
        debug!(refund_id = %refund_id, amount = charge.amount, "Refunded Stripe charge");

        Ok(
            RefundResponse::new(refund_id, transaction_id, PaymentStatus::Succeeded)
                .with_amount(charge.amount),
        )
    }
}

impl RecurringPaymentProcessor for StripeSandboxProcessor {
    #[instrument(skip_all, fields(customer = %customer.name, interval = ?payment.interval))]
    fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> PaymentResult<PaymentResponse> {
        if !payment.interval.is_recurring() {
            return Err(PaymentError::processing(
                PROVIDER,
                "recurring payments require a weekly, monthly or yearly interval",
            ));
        }
        Self::check_source(payment)?;

        let subscription_id = new_id("sub");
        info!(subscription_id = %subscription_id, "Created Stripe subscription");

        Ok(
            PaymentResponse::new(PaymentStatus::Pending, subscription_id, payment).with_message(
                format!(
                    "Subscribed {} at {} per {:?}",
                    customer.name,
                    payment.display_amount(),
                    payment.interval
                ),
            ),
        )
    }
}
