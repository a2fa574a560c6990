//! # pay-api
//!
//! HTTP API layer for paystack-checkout-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Start a Paystack checkout (bearer token required) |
//! | GET | `/api/v1/prices` | List prices |
//! | GET | `/api/v1/prices/{price_id}` | Get price |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
