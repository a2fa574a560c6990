//! # Transaction Types
//!
//! Request and outcome types for initializing a hosted checkout.

use crate::customer::User;
use crate::price::Price;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of every generated transaction reference
pub const REFERENCE_PREFIX: &str = "sub_";

/// Correlates the outbound request with the provider's callback.
///
/// Never persisted by the initiator; it only travels in request metadata
/// and the callback URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionReference(String);

impl TransactionReference {
    /// Generate a fresh `sub_<uuid-v4>` reference
    pub fn generate() -> Self {
        Self(format!("{}{}", REFERENCE_PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labelled metadata field rendered on the provider's dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

impl CustomField {
    pub fn new(
        display_name: impl Into<String>,
        variable_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            variable_name: variable_name.into(),
            value: value.into(),
        }
    }
}

/// Metadata attached to an initialized transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub user_id: String,
    pub price_id: String,
    pub reference: TransactionReference,
    pub custom_fields: Vec<CustomField>,
}

/// Everything a gateway needs to start a hosted checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeTransaction {
    /// Payer email
    pub email: String,

    /// Amount in the smallest currency unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// Provider plan code
    pub plan: String,

    /// Absolute URL the provider redirects to after payment
    pub callback_url: String,

    pub metadata: TransactionMetadata,
}

impl InitializeTransaction {
    /// Build the request for a user buying a price
    pub fn new(
        user: &User,
        price: &Price,
        reference: TransactionReference,
        callback_url: impl Into<String>,
    ) -> Self {
        let user_id = user.id.to_string();
        Self {
            email: user.email.clone(),
            amount: price.unit_amount,
            plan: price.id.clone(),
            callback_url: callback_url.into(),
            metadata: TransactionMetadata {
                user_id: user_id.clone(),
                price_id: price.id.clone(),
                reference,
                custom_fields: vec![
                    CustomField::new("User ID", "user_id", user_id),
                    CustomField::new("Price ID", "price_id", price.id.clone()),
                ],
            },
        }
    }

    pub fn reference(&self) -> &TransactionReference {
        &self.metadata.reference
    }
}

/// Parsed gateway answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponse {
    /// The provider accepted the transaction
    Success {
        authorization_url: String,
        access_code: Option<String>,
        reference: Option<String>,
    },
    /// The provider answered with a falsy status
    Failure { message: String },
}

/// Outcome of a checkout: exactly one of the two URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutResult {
    /// Hosted payment page to send the user to
    AuthorizationUrl(String),
    /// Site URL carrying an error message and advice
    ErrorRedirect(String),
}

impl CheckoutResult {
    pub fn authorization_url(&self) -> Option<&str> {
        match self {
            CheckoutResult::AuthorizationUrl(url) => Some(url),
            CheckoutResult::ErrorRedirect(_) => None,
        }
    }

    pub fn error_redirect(&self) -> Option<&str> {
        match self {
            CheckoutResult::ErrorRedirect(url) => Some(url),
            CheckoutResult::AuthorizationUrl(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutResult::AuthorizationUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{BillingInterval, Currency};

    #[test]
    fn test_reference_format() {
        let reference = TransactionReference::generate();
        let uuid_part = reference.as_str().strip_prefix(REFERENCE_PREFIX).unwrap();

        let parsed = Uuid::parse_str(uuid_part).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(reference, TransactionReference::generate());
    }

    #[test]
    fn test_initialize_request_body() {
        let user = User::new("user-1", "ada@example.com");
        let price = Price::recurring("PLN_pro", 250_000, Currency::NGN, BillingInterval::Month);
        let reference = TransactionReference::generate();

        let request = InitializeTransaction::new(
            &user,
            &price,
            reference.clone(),
            format!("https://app.example/account?reference={}", reference),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["amount"], 250_000);
        assert_eq!(body["plan"], "PLN_pro");
        assert_eq!(body["metadata"]["user_id"], "user-1");
        assert_eq!(body["metadata"]["price_id"], "PLN_pro");
        assert_eq!(body["metadata"]["reference"], reference.as_str());
        assert_eq!(
            body["metadata"]["custom_fields"],
            serde_json::json!([
                { "display_name": "User ID", "variable_name": "user_id", "value": "user-1" },
                { "display_name": "Price ID", "variable_name": "price_id", "value": "PLN_pro" }
            ])
        );
    }

    #[test]
    fn test_amount_omitted_when_unset() {
        let user = User::new("user-1", "ada@example.com");
        let mut price = Price::one_time("PLN_x", 0, Currency::USD);
        price.unit_amount = None;

        let request =
            InitializeTransaction::new(&user, &price, TransactionReference::generate(), "https://a/b");
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("amount").is_none());
    }

    #[test]
    fn test_checkout_result_shape() {
        let ok = CheckoutResult::AuthorizationUrl("https://pay.example/abc".into());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "authorizationUrl": "https://pay.example/abc" })
        );
        assert!(ok.is_success());
        assert_eq!(ok.error_redirect(), None);

        let err = CheckoutResult::ErrorRedirect("/account?error=x".into());
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "errorRedirect": "/account?error=x" })
        );
        assert_eq!(err.authorization_url(), None);
    }
}
