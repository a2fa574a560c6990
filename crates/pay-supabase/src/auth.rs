//! # Supabase Auth Sessions
//!
//! Resolves the caller's access token to a user through
//! `GET /auth/v1/user`.

use crate::config::SupabaseConfig;
use async_trait::async_trait;
use pay_core::{PaymentError, PaymentResult, SessionFactory, SessionProvider, User};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Builds per-request sessions against Supabase Auth
#[derive(Clone)]
pub struct SupabaseAuth {
    config: Arc<SupabaseConfig>,
    client: Client,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> PaymentResult<Self> {
        let client = config.http_client()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

impl SessionFactory for SupabaseAuth {
    fn session(&self, access_token: Option<&str>) -> Box<dyn SessionProvider> {
        Box::new(SupabaseSession {
            auth: self.clone(),
            access_token: access_token.map(String::from),
        })
    }
}

/// The session behind one request's access token
pub struct SupabaseSession {
    auth: SupabaseAuth,
    access_token: Option<String>,
}

#[async_trait]
impl SessionProvider for SupabaseSession {
    #[instrument(skip(self))]
    async fn get_user(&self) -> PaymentResult<Option<User>> {
        let Some(token) = self.access_token.as_deref() else {
            debug!("No access token on request");
            return Ok(None);
        };

        let response = self
            .auth
            .client
            .get(self.auth.config.auth_url("user"))
            .header("apikey", &self.auth.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Supabase auth rejected token: status={}, body={}", status, body);
            return Err(PaymentError::Session(format!("HTTP {}: {}", status, body)));
        }

        let user: AuthUser = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Session(format!("Failed to parse Supabase user: {}", e))
        })?;

        let email = user
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| PaymentError::Session(format!("User {} has no email", user.id)))?;

        Ok(Some(User::new(user.id, email)))
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_for(server: &MockServer) -> SupabaseAuth {
        SupabaseAuth::new(SupabaseConfig::new(server.uri(), "anon-key", "service-key")).unwrap()
    }

    #[tokio::test]
    async fn test_resolves_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "8f2c1f9e-4a70-4b0a-9d1e-1c2b3a4d5e6f",
                "aud": "authenticated",
                "email": "ada@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = auth_for(&server)
            .session(Some("user-jwt"))
            .get_user()
            .await
            .unwrap();

        assert_eq!(
            user,
            Some(User::new("8f2c1f9e-4a70-4b0a-9d1e-1c2b3a4d5e6f", "ada@example.com"))
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_no_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let user = auth_for(&server).session(None).get_user().await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_rejected_token_is_session_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "error_code": "bad_jwt",
                "msg": "invalid JWT"
            })))
            .mount(&server)
            .await;

        let err = auth_for(&server)
            .session(Some("expired"))
            .get_user()
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Session(_)));
    }

    #[tokio::test]
    async fn test_user_without_email_is_session_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "u1", "phone": "+234" })),
            )
            .mount(&server)
            .await;

        let err = auth_for(&server)
            .session(Some("jwt"))
            .get_user()
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Session(_)));
    }
}
