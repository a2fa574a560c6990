//! # Supabase Configuration
//!
//! Project URL and API keys, loaded from environment variables.

use pay_core::PaymentError;
use reqwest::Client;
use std::env;
use std::time::Duration;

/// Supabase project configuration
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://xyzcompany.supabase.co")
    pub url: String,

    /// Public anon key, sent as `apikey` on auth requests
    pub anon_key: String,

    /// Service role key used for the `customers` table
    pub service_role_key: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    /// - `SUPABASE_SERVICE_ROLE_KEY`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok();

        let url = required("SUPABASE_URL")?;
        let anon_key = required("SUPABASE_ANON_KEY")?;
        let service_role_key = required("SUPABASE_SERVICE_ROLE_KEY")?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PaymentError::Configuration(
                "SUPABASE_URL must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self::new(url, anon_key, service_role_key))
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_role_key: service_role_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    /// Build the HTTP client shared by an adapter
    pub(crate) fn http_client(&self) -> Result<Client, PaymentError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| PaymentError::Configuration(format!("Failed to create HTTP client: {}", e)))
    }
}

fn required(name: &str) -> Result<String, PaymentError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PaymentError::Configuration(format!("{} not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = SupabaseConfig::new("https://proj.supabase.co/", "anon", "service");

        assert_eq!(config.auth_url("/user"), "https://proj.supabase.co/auth/v1/user");
        assert_eq!(
            config.rest_url("customers"),
            "https://proj.supabase.co/rest/v1/customers"
        );
    }

    #[test]
    fn test_from_env_missing_url() {
        env::remove_var("SUPABASE_URL");

        let result = SupabaseConfig::from_env();
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }
}
