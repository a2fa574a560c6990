//! # Collaborator Ports
//!
//! Traits for the external systems a checkout talks to. Adapters live in
//! their own crates (`pay-paystack`, `pay-supabase`); in-memory versions for
//! tests and local runs live in [`crate::memory`].
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       CheckoutInitiator                       │
//! └───────────────────────────────────────────────────────────────┘
//!          │                     │                      │
//!  ┌───────┴───────┐     ┌───────┴───────┐      ┌───────┴───────┐
//!  │SessionProvider│     │ CustomerStore │      │PaymentGateway │
//!  │  (Supabase)   │     │  (PostgREST)  │      │  (Paystack)   │
//!  └───────────────┘     └───────────────┘      └───────────────┘
//! ```

use crate::customer::{CustomerRecord, User, UserId};
use crate::error::PaymentResult;
use crate::transaction::{GatewayResponse, InitializeTransaction};
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves the user behind the current request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` means there is no session; `Err` means the provider failed.
    async fn get_user(&self) -> PaymentResult<Option<User>>;
}

/// Builds a per-request [`SessionProvider`] from the caller's credentials.
pub trait SessionFactory: Send + Sync {
    fn session(&self, access_token: Option<&str>) -> Box<dyn SessionProvider>;
}

/// Storage for the user → Paystack customer mapping.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Look up the record for a user
    async fn find(&self, user_id: &UserId) -> PaymentResult<Option<CustomerRecord>>;

    /// Insert the record keyed on `id`.
    ///
    /// Idempotent: repeated calls succeed, and a row that already exists
    /// keeps its `paystack_customer_id`.
    async fn upsert(&self, record: &CustomerRecord) -> PaymentResult<()>;
}

/// Remote payment provider able to start a hosted checkout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a transaction and return the provider's verdict.
    ///
    /// A falsy provider status is `Ok(GatewayResponse::Failure)`; `Err` is
    /// reserved for transport and decoding problems.
    async fn initialize_transaction(
        &self,
        request: &InitializeTransaction,
    ) -> PaymentResult<GatewayResponse>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

pub type BoxedSessionFactory = Arc<dyn SessionFactory>;
pub type BoxedCustomerStore = Arc<dyn CustomerStore>;
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
