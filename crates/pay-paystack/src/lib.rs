//! # pay-paystack
//!
//! Paystack payment gateway for paystack-checkout-rs.
//!
//! `PaystackGateway` implements `pay_core::PaymentGateway` on top of
//! Paystack's `POST /transaction/initialize` endpoint.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paystack::PaystackGateway;
//! use pay_core::{CheckoutInitiator, RedirectFormatter};
//! use std::sync::Arc;
//!
//! // Create gateway from environment (PAYSTACK_SECRET_KEY)
//! let gateway = Arc::new(PaystackGateway::from_env()?);
//!
//! let initiator = CheckoutInitiator::new(customers, gateway, RedirectFormatter::new(site_url));
//! ```

pub mod config;
pub mod transaction;

// Re-exports
pub use config::PaystackConfig;
pub use transaction::PaystackGateway;
