//! # Payment Types
//!
//! Payment instrument data and the responses processors hand back.
//! The service treats all of these as opaque payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
            Currency::CHF => "chf",
            Currency::MXN => "mxn",
        }
    }

    /// Parse a case-insensitive ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "usd" => Some(Currency::USD),
            "eur" => Some(Currency::EUR),
            "gbp" => Some(Currency::GBP),
            "jpy" => Some(Currency::JPY),
            "cad" => Some(Currency::CAD),
            "aud" => Some(Currency::AUD),
            "chf" => Some(Currency::CHF),
            "mxn" => Some(Currency::MXN),
            _ => None,
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, most others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Format an amount in the smallest unit (e.g. 2500 USD -> "25.00 USD")
    pub fn format_amount(&self, amount: i64) -> String {
        let places = self.decimal_places() as u32;
        if places == 0 {
            return format!("{} {}", amount, self);
        }
        let divisor = 10_i64.pow(places);
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();
        format!(
            "{}{}.{:0width$} {}",
            sign,
            abs / divisor as u64,
            abs % divisor as u64,
            self,
            width = places as usize
        )
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Billing interval for recurring charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    /// One-time payment (not recurring)
    OneTime,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingInterval {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillingInterval::OneTime)
    }
}

impl Default for BillingInterval {
    fn default() -> Self {
        BillingInterval::OneTime
    }
}

/// Payment instrument data for a single charge or schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,

    /// Currency
    #[serde(default)]
    pub currency: Currency,

    /// Instrument token (e.g. "tok_visa")
    pub source: String,

    /// Free-form description shown on statements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Billing interval, only meaningful for recurring setup
    #[serde(default)]
    pub interval: BillingInterval,
}

impl PaymentData {
    /// One-time charge of `amount` smallest units
    pub fn new(amount: i64, currency: Currency, source: impl Into<String>) -> Self {
        Self {
            amount,
            currency,
            source: source.into(),
            description: None,
            interval: BillingInterval::OneTime,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set billing interval
    pub fn with_interval(mut self, interval: BillingInterval) -> Self {
        self.interval = interval;
        self
    }

    /// Amount formatted for display
    pub fn display_amount(&self) -> String {
        self.currency.format_amount(self.amount)
    }
}

/// Outcome reported by a processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
    /// Accepted but not yet settled (e.g. a scheduled recurring charge)
    Pending,
    Failed,
}

/// Result of a processor call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Outcome
    pub status: PaymentStatus,

    /// Processor-issued transaction identifier
    pub transaction_id: String,

    /// Amount in smallest currency unit
    pub amount: i64,

    /// Currency
    pub currency: Currency,

    /// Processor message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PaymentResponse {
    /// Create a response for `payment` with the given outcome
    pub fn new(
        status: PaymentStatus,
        transaction_id: impl Into<String>,
        payment: &PaymentData,
    ) -> Self {
        Self {
            status,
            transaction_id: transaction_id.into(),
            amount: payment.amount,
            currency: payment.currency,
            message: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check if the processor reported success. Pending counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self.status, PaymentStatus::Succeeded | PaymentStatus::Pending)
    }
}

/// Result of a refund call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundResponse {
    /// Processor-issued refund identifier
    pub refund_id: String,

    /// The transaction being reversed
    pub transaction_id: String,

    /// Outcome
    pub status: PaymentStatus,

    /// Refunded amount, when the processor reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RefundResponse {
    pub fn new(
        refund_id: impl Into<String>,
        transaction_id: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            refund_id: refund_id.into(),
            transaction_id: transaction_id.into(),
            status,
            amount: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: set refunded amount
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }
}
