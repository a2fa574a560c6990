//! # Customers Table
//!
//! `CustomerStore` over PostgREST. Rows are inserted with
//! `resolution=ignore-duplicates`, so a row the webhook handler already
//! linked is never reset to null.

use crate::config::SupabaseConfig;
use async_trait::async_trait;
use pay_core::{CustomerRecord, CustomerStore, PaymentError, PaymentResult, UserId};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, instrument};

const TABLE: &str = "customers";

/// Supabase-backed customer records
pub struct SupabaseCustomerStore {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseCustomerStore {
    pub fn new(config: SupabaseConfig) -> PaymentResult<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }
}

#[async_trait]
impl CustomerStore for SupabaseCustomerStore {
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn find(&self, user_id: &UserId) -> PaymentResult<Option<CustomerRecord>> {
        let request = self
            .client
            .get(self.config.rest_url(TABLE))
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", "id,paystack_customer_id".to_string()),
            ]);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Customer lookup failed: status={}, body={}", status, body);
            return Err(PaymentError::Store(format!("HTTP {}: {}", status, body)));
        }

        let rows: Vec<CustomerRecord> = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse customers: {}", e))
        })?;

        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, record), fields(user_id = %record.id))]
    async fn upsert(&self, record: &CustomerRecord) -> PaymentResult<()> {
        let request = self
            .client
            .post(self.config.rest_url(TABLE))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=ignore-duplicates,return=minimal")
            .json(&[record]);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Customer upsert failed: status={}, body={}", status, body);
            return Err(PaymentError::Store(format!("HTTP {}: {}", status, body)));
        }

        debug!("Customer record ensured");
        Ok(())
    }
}
