//! # Notifiers
//!
//! Email and SMS confirmation strategies, plus the caller-side helper that
//! picks one from a customer's contact info.
//!
//! Delivery is represented by a tracing event; no message leaves the process.

use crate::customer::CustomerData;
use crate::error::{PaymentError, PaymentResult};
use crate::strategy::{BoxedNotifier, Notifier};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_SMS_GATEWAY: &str = "SMSGatewayExample";
pub const DEFAULT_EMAIL_SENDER: &str = "payments@example.com";

/// Sends confirmations by email
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    sender: String,
}

impl EmailNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

impl Default for EmailNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_SENDER)
    }
}

impl Notifier for EmailNotifier {
    fn send_confirmation(&self, customer: &CustomerData) -> PaymentResult<()> {
        let email = customer.contact_info.email().ok_or_else(|| {
            PaymentError::notification(
                self.channel(),
                format!("customer '{}' has no email address", customer.name),
            )
        })?;

        info!(
            channel = self.channel(),
            from = %self.sender,
            to = %email,
            "Sending payment confirmation to {}",
            customer.name
        );
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "email"
    }
}

/// Sends confirmations by text message through a named gateway
#[derive(Debug, Clone)]
pub struct SmsNotifier {
    gateway: String,
}

impl SmsNotifier {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }
}

impl Default for SmsNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_SMS_GATEWAY)
    }
}

impl Notifier for SmsNotifier {
    fn send_confirmation(&self, customer: &CustomerData) -> PaymentResult<()> {
        let phone = customer.contact_info.phone().ok_or_else(|| {
            PaymentError::notification(
                self.channel(),
                format!("customer '{}' has no phone number", customer.name),
            )
        })?;

        info!(
            channel = self.channel(),
            gateway = %self.gateway,
            to = %phone,
            "Sending payment confirmation to {}",
            customer.name
        );
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "sms"
    }
}

/// Settings used to build whichever notifier gets selected
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// SMS gateway name
    pub sms_gateway: String,
    /// Email sender address
    pub email_sender: String,
}

impl NotifierSettings {
    pub fn email_notifier(&self) -> EmailNotifier {
        EmailNotifier::new(&self.email_sender)
    }

    pub fn sms_notifier(&self) -> SmsNotifier {
        SmsNotifier::new(&self.sms_gateway)
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            sms_gateway: DEFAULT_SMS_GATEWAY.to_string(),
            email_sender: DEFAULT_EMAIL_SENDER.to_string(),
        }
    }
}

/// Pick a notifier for `customer`: SMS if a phone is present, otherwise
/// email, otherwise fail.
///
/// # Errors
/// `PaymentError::Selection` when neither phone nor email is usable.
pub fn select_notifier(
    customer: &CustomerData,
    settings: &NotifierSettings,
) -> PaymentResult<BoxedNotifier> {
    if customer.contact_info.phone().is_some() {
        return Ok(Arc::new(settings.sms_notifier()));
    }

    if customer.contact_info.email().is_some() {
        return Ok(Arc::new(settings.email_notifier()));
    }

    Err(PaymentError::Selection(format!(
        "customer '{}' has neither phone nor email",
        customer.name
    )))
}
