//! # Reference Validators
//!
//! Basic customer and payment checks. Deployments with stricter rules plug
//! in their own `CustomerValidator` / `PaymentDataValidator`.

use crate::customer::CustomerData;
use crate::error::{PaymentError, PaymentResult};
use crate::payment::PaymentData;
use crate::strategy::{CustomerValidator, PaymentDataValidator};

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Name must be present; contact fields, when given, must be well-formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCustomerValidator;

impl BasicCustomerValidator {
    pub fn new() -> Self {
        Self
    }
}

impl CustomerValidator for BasicCustomerValidator {
    fn validate(&self, customer: &CustomerData) -> PaymentResult<()> {
        if customer.name.trim().is_empty() {
            return Err(PaymentError::validation("name", "customer name is required"));
        }

        if let Some(email) = customer.contact_info.email() {
            if !is_plausible_email(email) {
                return Err(PaymentError::validation(
                    "email",
                    format!("'{}' is not a valid email address", email),
                ));
            }
        }

        if let Some(phone) = customer.contact_info.phone() {
            if !is_plausible_phone(phone) {
                return Err(PaymentError::validation(
                    "phone",
                    format!("'{}' is not a valid phone number", phone),
                ));
            }
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false)
}

fn is_plausible_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    allowed && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Amount must be positive and the instrument token present.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPaymentValidator {
    /// Optional upper bound in smallest currency unit
    max_amount: Option<i64>,
}

impl BasicPaymentValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: reject amounts above `max_amount`
    pub fn with_max_amount(mut self, max_amount: i64) -> Self {
        self.max_amount = Some(max_amount);
        self
    }
}

impl PaymentDataValidator for BasicPaymentValidator {
    fn validate(&self, payment: &PaymentData) -> PaymentResult<()> {
        if payment.amount <= 0 {
            return Err(PaymentError::validation(
                "amount",
                format!("amount must be positive, got {}", payment.amount),
            ));
        }

        if let Some(max) = self.max_amount {
            if payment.amount > max {
                return Err(PaymentError::validation(
                    "amount",
                    format!(
                        "{} exceeds the limit of {}",
                        payment.display_amount(),
                        payment.currency.format_amount(max)
                    ),
                ));
            }
        }

        if payment.source.trim().is_empty() {
            return Err(PaymentError::validation("source", "payment source is required"));
        }

        Ok(())
    }
}
