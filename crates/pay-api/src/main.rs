//! # Paystack Checkout RS
//!
//! Checkout initiation service for Paystack subscriptions.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYSTACK_SECRET_KEY=sk_test_...
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_ANON_KEY=...
//! export SUPABASE_SERVICE_ROLE_KEY=...
//! export SITE_URL=https://app.example.com
//!
//! # Run the server
//! paystack-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Wire Supabase and Paystack from the environment
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Prices loaded: {}", state.catalog.len());
    info!("Site URL: {}", state.initiator.redirects().site_url());

    // Create router
    let app = routes::create_router(state);

    info!("Paystack checkout starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Paystack Checkout RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
