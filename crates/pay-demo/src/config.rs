//! # Demo Configuration
//!
//! Environment-driven settings plus the customer fixture loaded from
//! `config/customer.toml`.

use pay_core::{BillingInterval, ContactInfo, Currency, CustomerData, NotifierSettings};
use pay_stripe::{StripeConfig, TOKEN_VISA};
use std::env;
use tracing::{info, warn};

/// Key used when `STRIPE_SECRET_KEY` is not set
pub const FALLBACK_TEST_KEY: &str = "sk_test_sandbox";

const CUSTOMER_PATHS: [&str; 3] = [
    "config/customer.toml",
    "../config/customer.toml",
    "../../config/customer.toml",
];

/// Demo configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Settings for whichever notifier gets built
    pub notifier: NotifierSettings,
    /// Charge amount in smallest currency unit
    pub amount: i64,
    /// Charge currency
    pub currency: Currency,
    /// Payment source token
    pub source: String,
    /// Interval used for the recurring setup
    pub interval: BillingInterval,
    /// Processor configuration
    pub stripe: StripeConfig,
}

impl DemoConfig {
    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SMS_GATEWAY` | `SMSGatewayExample` |
    /// | `NOTIFY_SENDER` | `payments@example.com` |
    /// | `DEMO_AMOUNT` | `2500` |
    /// | `DEMO_CURRENCY` | `usd` |
    /// | `DEMO_SOURCE` | `tok_visa` |
    /// | `STRIPE_SECRET_KEY` | `sk_test_sandbox` |
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = NotifierSettings::default();
        let notifier = NotifierSettings {
            sms_gateway: env::var("SMS_GATEWAY").unwrap_or(defaults.sms_gateway),
            email_sender: env::var("NOTIFY_SENDER").unwrap_or(defaults.email_sender),
        };

        let amount = match env::var("DEMO_AMOUNT") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("DEMO_AMOUNT '{}' is not an integer: {}", raw, e))?,
            Err(_) => 2500,
        };

        let currency = match env::var("DEMO_CURRENCY") {
            Ok(code) => Currency::from_code(&code)
                .ok_or_else(|| anyhow::anyhow!("DEMO_CURRENCY '{}' is not supported", code))?,
            Err(_) => Currency::USD,
        };

        let source = env::var("DEMO_SOURCE").unwrap_or_else(|_| TOKEN_VISA.to_string());

        let stripe = if env::var("STRIPE_SECRET_KEY").is_ok() {
            StripeConfig::from_env()?
        } else {
            warn!("STRIPE_SECRET_KEY not set, using {}", FALLBACK_TEST_KEY);
            StripeConfig::new(FALLBACK_TEST_KEY)
        };

        Ok(Self {
            notifier,
            amount,
            currency,
            source,
            interval: BillingInterval::Monthly,
            stripe,
        })
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            notifier: NotifierSettings::default(),
            amount: 2500,
            currency: Currency::USD,
            source: TOKEN_VISA.to_string(),
            interval: BillingInterval::Monthly,
            stripe: StripeConfig::new(FALLBACK_TEST_KEY),
        }
    }
}

/// Customer used when no fixture file is found
pub fn default_customer() -> CustomerData {
    CustomerData::new("Jon Doe", ContactInfo::new().with_email("jon.doe@mail.co"))
}

/// Parse a customer fixture
pub fn customer_from_toml(content: &str) -> anyhow::Result<CustomerData> {
    Ok(toml::from_str(content)?)
}

/// Load the customer fixture from config/customer.toml
pub fn load_customer() -> anyhow::Result<CustomerData> {
    for path in CUSTOMER_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            let customer = customer_from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            info!("Loaded customer '{}' from {}", customer.name, path);
            return Ok(customer);
        }
    }

    warn!("No customer fixture found, using default customer");
    Ok(default_customer())
}
