//! # Users and Customer Records
//!
//! The authenticated `User` comes from the session provider; the
//! `CustomerRecord` maps that user to a Paystack customer once the webhook
//! handler has confirmed one.

use serde::{Deserialize, Serialize};

/// Stable internal user identifier (the auth provider's subject id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            email: email.into(),
        }
    }
}

/// Row of the `customers` table: one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: UserId,

    /// Paystack customer code, filled in by the webhook handler
    #[serde(default)]
    pub paystack_customer_id: Option<String>,
}

impl CustomerRecord {
    /// A record awaiting its Paystack customer
    pub fn pending(id: UserId) -> Self {
        Self {
            id,
            paystack_customer_id: None,
        }
    }

    /// True once Paystack has confirmed a customer for this user
    pub fn is_linked(&self) -> bool {
        self.paystack_customer_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}
