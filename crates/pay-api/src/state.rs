//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the checkout initiator, session factory, price catalog and configuration.

use pay_core::{
    BoxedCustomerStore, BoxedPaymentGateway, BoxedSessionFactory, CheckoutInitiator,
    PriceCatalog, RedirectFormatter,
};
use pay_paystack::PaystackGateway;
use pay_supabase::{SupabaseAuth, SupabaseConfig, SupabaseCustomerStore};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Canonical site URL used for callback links
    pub site_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            site_url: std::env::var("SITE_URL").unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout workflow
    pub initiator: Arc<CheckoutInitiator>,
    /// Turns request credentials into sessions
    pub sessions: BoxedSessionFactory,
    /// Purchasable prices
    pub catalog: Arc<PriceCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState wired to Supabase and Paystack
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_price_catalog()?;

        let supabase = SupabaseConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to configure Supabase: {}", e))?;
        let sessions = SupabaseAuth::new(supabase.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Supabase auth: {}", e))?;
        let customers = SupabaseCustomerStore::new(supabase)
            .map_err(|e| anyhow::anyhow!("Failed to initialize customer store: {}", e))?;

        let gateway = PaystackGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Paystack: {}", e))?;

        Ok(Self::from_parts(
            config,
            catalog,
            Arc::new(sessions),
            Arc::new(customers),
            Arc::new(gateway),
        ))
    }

    /// Assemble state from explicit collaborators
    pub fn from_parts(
        config: AppConfig,
        catalog: PriceCatalog,
        sessions: BoxedSessionFactory,
        customers: BoxedCustomerStore,
        gateway: BoxedPaymentGateway,
    ) -> Self {
        let redirects = RedirectFormatter::new(&config.site_url);

        Self {
            initiator: Arc::new(CheckoutInitiator::new(customers, gateway, redirects)),
            sessions,
            catalog: Arc::new(catalog),
            config,
        }
    }
}

/// Load price catalog from config file
fn load_price_catalog() -> anyhow::Result<PriceCatalog> {
    let config_paths = [
        "config/prices.toml",
        "../config/prices.toml",
        "../../config/prices.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = PriceCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} prices from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No price catalog found, using empty catalog");
    Ok(PriceCatalog::new())
}
