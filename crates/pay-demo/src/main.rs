//! # payment-demo
//!
//! Runs one charge, one refund and one recurring setup against the Stripe
//! sandbox processor.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: pick the processor key and the charge
//! export STRIPE_SECRET_KEY=sk_test_...
//! export DEMO_AMOUNT=4999
//!
//! payment-demo
//! ```

use pay_demo::{load_customer, DemoConfig, DemoState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let config = DemoConfig::from_env()?;
    let customer = load_customer()?;

    let mut state = DemoState::new(config, customer)?;
    info!("Service ready: {:?}", state.service);

    let report = state.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Payment Service Demo
  ━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
