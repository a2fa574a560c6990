//! # pay-supabase
//!
//! Supabase adapters for paystack-checkout-rs:
//!
//! - **SupabaseAuth** - resolves request access tokens via Supabase Auth
//! - **SupabaseCustomerStore** - the `customers` table via PostgREST
//!
//! ```rust,ignore
//! use pay_supabase::{SupabaseAuth, SupabaseConfig, SupabaseCustomerStore};
//!
//! let config = SupabaseConfig::from_env()?;
//! let sessions = SupabaseAuth::new(config.clone())?;
//! let customers = SupabaseCustomerStore::new(config)?;
//!
//! let session = sessions.session(Some(access_token));
//! let user = session.get_user().await?;
//! ```

pub mod auth;
pub mod config;
pub mod customers;

pub use auth::{SupabaseAuth, SupabaseSession};
pub use config::SupabaseConfig;
pub use customers::SupabaseCustomerStore;
