//! # pay-core
//!
//! Core types and orchestration for the paystack-checkout service.
//!
//! This crate provides:
//! - `CheckoutInitiator`, the single checkout workflow
//! - `SessionProvider`, `CustomerStore` and `PaymentGateway` ports
//! - `Price` and `PriceCatalog` for billing prices
//! - `RedirectFormatter` for callback and error-redirect URLs
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutInitiator, RedirectFormatter};
//!
//! let initiator = CheckoutInitiator::new(customers, gateway, RedirectFormatter::new(site_url));
//!
//! match initiator.checkout(&session, &price, Some("/account")).await {
//!     CheckoutResult::AuthorizationUrl(url) => { /* send the user to Paystack */ }
//!     CheckoutResult::ErrorRedirect(url) => { /* back to the site with a toast */ }
//! }
//! ```

pub mod checkout;
pub mod customer;
pub mod error;
pub mod memory;
pub mod ports;
pub mod price;
pub mod redirect;
pub mod transaction;

// Re-exports for convenience
pub use checkout::{CheckoutInitiator, DEFAULT_REDIRECT_PATH, GENERIC_ADVICE};
pub use customer::{CustomerRecord, User, UserId};
pub use error::{ErrorKind, PaymentError, PaymentResult};
pub use memory::{InMemoryCustomerStore, InMemorySessions, StaticSession};
pub use ports::{
    BoxedCustomerStore, BoxedPaymentGateway, BoxedSessionFactory, CustomerStore, PaymentGateway,
    SessionFactory, SessionProvider,
};
pub use price::{BillingInterval, Currency, Price, PriceCatalog, PriceType};
pub use redirect::{RedirectFormatter, ToastKind};
pub use transaction::{
    CheckoutResult, CustomField, GatewayResponse, InitializeTransaction, TransactionMetadata,
    TransactionReference,
};
