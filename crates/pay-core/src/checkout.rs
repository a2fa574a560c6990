//! # Checkout Initiation
//!
//! `CheckoutInitiator` runs the whole flow for one request:
//!
//! 1. resolve the user from the session
//! 2. generate a `sub_<uuid>` reference
//! 3. make sure a customer row exists for the user
//! 4. ask the gateway for a hosted checkout
//! 5. turn the outcome into a `CheckoutResult`
//!
//! Failures never escape `checkout`; they become an error-redirect.

use crate::customer::{CustomerRecord, User};
use crate::error::{ErrorKind, PaymentError, PaymentResult};
use crate::ports::{BoxedCustomerStore, BoxedPaymentGateway, SessionProvider};
use crate::price::Price;
use crate::redirect::RedirectFormatter;
use crate::transaction::{
    CheckoutResult, GatewayResponse, InitializeTransaction, TransactionReference,
};
use tracing::{debug, error, info, instrument, warn};

/// Landing page used when the caller gives no redirect path
pub const DEFAULT_REDIRECT_PATH: &str = "/account";

/// Remediation advice attached to every error-redirect
pub const GENERIC_ADVICE: &str = "Please try again later or contact a system administrator.";

/// Orchestrates a single checkout
pub struct CheckoutInitiator {
    customers: BoxedCustomerStore,
    gateway: BoxedPaymentGateway,
    redirects: RedirectFormatter,
}

impl CheckoutInitiator {
    pub fn new(
        customers: BoxedCustomerStore,
        gateway: BoxedPaymentGateway,
        redirects: RedirectFormatter,
    ) -> Self {
        Self {
            customers,
            gateway,
            redirects,
        }
    }

    pub fn redirects(&self) -> &RedirectFormatter {
        &self.redirects
    }

    /// Start a hosted checkout for `price`.
    ///
    /// `redirect_path` is both the post-payment landing page and the base of
    /// error redirects; it defaults to [`DEFAULT_REDIRECT_PATH`].
    #[instrument(skip(self, session, price), fields(price_id = %price.id, provider = self.gateway.provider_name()))]
    pub async fn checkout(
        &self,
        session: &dyn SessionProvider,
        price: &Price,
        redirect_path: Option<&str>,
    ) -> CheckoutResult {
        let redirect_path = redirect_path
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_REDIRECT_PATH);

        match self.initiate(session, price, redirect_path).await {
            Ok(authorization_url) => CheckoutResult::AuthorizationUrl(authorization_url),
            Err(err) => {
                error!("Checkout error ({:?}): {}", err.kind(), err);
                CheckoutResult::ErrorRedirect(self.redirects.error_redirect(
                    redirect_path,
                    &err.user_message(),
                    GENERIC_ADVICE,
                ))
            }
        }
    }

    async fn initiate(
        &self,
        session: &dyn SessionProvider,
        price: &Price,
        redirect_path: &str,
    ) -> PaymentResult<String> {
        let user = resolve_user(session).await?;
        let reference = TransactionReference::generate();

        self.ensure_customer(&user).await;

        let callback_url = self
            .redirects
            .url(&format!("{}?reference={}", redirect_path, reference));
        let request = InitializeTransaction::new(&user, price, reference, callback_url);

        debug!(
            "Initializing transaction: reference={}, callback_url={}",
            request.reference(),
            request.callback_url
        );

        match self.gateway.initialize_transaction(&request).await? {
            GatewayResponse::Success {
                authorization_url, ..
            } => {
                info!(
                    "Checkout initialized: user={}, reference={}",
                    user.id,
                    request.reference()
                );
                Ok(authorization_url)
            }
            GatewayResponse::Failure { message } => Err(PaymentError::gateway(
                self.gateway.provider_name(),
                message,
            )),
        }
    }

    /// Create a pending customer row when the user has no Paystack customer yet.
    ///
    /// Lookup and upsert failures are logged only; the row is filled in by
    /// the webhook handler and checkout does not read it.
    async fn ensure_customer(&self, user: &User) {
        let existing = match self.customers.find(&user.id).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Customer lookup failed for {}: {}", user.id, e);
                None
            }
        };

        if existing.as_ref().is_some_and(CustomerRecord::is_linked) {
            return;
        }

        if let Err(e) = self
            .customers
            .upsert(&CustomerRecord::pending(user.id.clone()))
            .await
        {
            warn!("Customer upsert failed for {}: {}", user.id, e);
        }
    }
}

async fn resolve_user(session: &dyn SessionProvider) -> PaymentResult<User> {
    match session.get_user().await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(PaymentError::Unauthenticated),
        Err(e) => {
            error!("Session lookup failed: {}", e);
            match e.kind() {
                ErrorKind::Auth => Err(e),
                _ => Err(PaymentError::Session(e.to_string())),
            }
        }
    }
}
