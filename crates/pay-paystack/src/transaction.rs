//! # Paystack Transactions
//!
//! `POST /transaction/initialize`: starts a hosted checkout and returns the
//! authorization URL the payer is sent to.

use crate::config::PaystackConfig;
use async_trait::async_trait;
use pay_core::{
    GatewayResponse, InitializeTransaction, PaymentError, PaymentGateway, PaymentResult,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "paystack";

/// Paystack hosted checkout gateway
pub struct PaystackGateway {
    config: PaystackConfig,
    client: Client,
}

impl PaystackGateway {
    pub fn new(config: PaystackConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(PaystackConfig::from_env()?)
    }

    pub fn config(&self) -> &PaystackConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    #[instrument(skip(self, request), fields(reference = %request.reference(), plan = %request.plan))]
    async fn initialize_transaction(
        &self,
        request: &InitializeTransaction,
    ) -> PaymentResult<GatewayResponse> {
        let url = format!("{}/transaction/initialize", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        debug!("Paystack initialization response: status={}, body={}", status, body);

        // Paystack sends the same envelope on 4xx, so parse before judging status
        let envelope: PaystackEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                error!("Unreadable Paystack response: {}", e);
                return Err(PaymentError::Serialization(format!(
                    "Failed to parse Paystack response: {}",
                    e
                )));
            }
            Err(_) => {
                error!("Paystack API error: status={}, body={}", status, body);
                return Err(PaymentError::Network(format!("HTTP {}: {}", status, body)));
            }
        };

        let outcome = envelope.into_gateway_response()?;
        match &outcome {
            GatewayResponse::Success { reference, .. } => {
                info!("Initialized Paystack transaction: reference={:?}", reference);
            }
            GatewayResponse::Failure { message } => {
                error!("Paystack rejected transaction: status={}, message={}", status, message);
            }
        }

        Ok(outcome)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Paystack API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PaystackEnvelope {
    #[serde(default)]
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<InitializeData>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    #[serde(default)]
    access_code: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

impl PaystackEnvelope {
    fn into_gateway_response(self) -> PaymentResult<GatewayResponse> {
        if !self.status {
            return Ok(GatewayResponse::Failure {
                message: self.message.unwrap_or_default(),
            });
        }

        let data = self.data.ok_or_else(|| {
            PaymentError::Serialization("Paystack response missing data".to_string())
        })?;

        Ok(GatewayResponse::Success {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::{BillingInterval, Currency, Price, TransactionReference, User};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> InitializeTransaction {
        let user = User::new("user-1", "ada@example.com");
        let price = Price::recurring("PLN_pro", 250_000, Currency::NGN, BillingInterval::Month);
        InitializeTransaction::new(
            &user,
            &price,
            TransactionReference::generate(),
            "https://app.example.com/account?reference=sub_x",
        )
    }

    async fn gateway_for(server: &MockServer) -> PaystackGateway {
        let config = PaystackConfig::new("sk_test_secret").with_api_base_url(server.uri());
        PaystackGateway::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_success() {
        let server = MockServer::start().await;
        let request = request();

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .and(header("authorization", "Bearer sk_test_secret"))
            .and(body_partial_json(json!({
                "email": "ada@example.com",
                "amount": 250000,
                "plan": "PLN_pro",
                "metadata": {
                    "user_id": "user-1",
                    "price_id": "PLN_pro",
                    "reference": request.reference().as_str()
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/0peioxfhpn",
                    "access_code": "0peioxfhpn",
                    "reference": "7PVGX8MEk85tgeEpVDtD"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = gateway_for(&server)
            .await
            .initialize_transaction(&request)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            GatewayResponse::Success {
                authorization_url: "https://checkout.paystack.com/0peioxfhpn".to_string(),
                access_code: Some("0peioxfhpn".to_string()),
                reference: Some("7PVGX8MEk85tgeEpVDtD".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_falsy_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": false,
                "message": "Insufficient plan"
            })))
            .mount(&server)
            .await;

        let outcome = gateway_for(&server)
            .await
            .initialize_transaction(&request())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            GatewayResponse::Failure {
                message: "Insufficient plan".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_error_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .await
            .initialize_transaction(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Network(_)));
    }

    #[tokio::test]
    async fn test_success_without_data_is_serialization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .await
            .initialize_transaction(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Serialization(_)));
    }

    #[test]
    fn test_envelope_without_message() {
        let envelope: PaystackEnvelope = serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert_eq!(
            envelope.into_gateway_response().unwrap(),
            GatewayResponse::Failure {
                message: String::new()
            }
        );
    }
}
