//! # Redirect URLs
//!
//! Builds absolute site URLs (for provider callbacks) and toast redirects
//! carrying a status or error message back to the frontend.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Site URL used when none is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000/";

/// Same character set JavaScript's `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Which pair of query keys a toast uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Status,
    Error,
}

impl ToastKind {
    fn keys(&self) -> (&'static str, &'static str) {
        match self {
            ToastKind::Status => ("status", "status_description"),
            ToastKind::Error => ("error", "error_description"),
        }
    }
}

/// Formats URLs against the canonical site URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectFormatter {
    site_url: String,
}

impl RedirectFormatter {
    /// Normalize a configured site URL.
    ///
    /// Blank input falls back to [`DEFAULT_SITE_URL`]; trailing slashes are
    /// dropped and `https://` is assumed when no scheme is given.
    pub fn new(site_url: impl AsRef<str>) -> Self {
        let raw = site_url.as_ref().trim();
        let raw = if raw.is_empty() { DEFAULT_SITE_URL } else { raw };
        let trimmed = raw.trim_end_matches('/');

        let site_url = if trimmed.contains("http") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        Self { site_url }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Absolute URL for a site path
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.site_url.clone()
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }

    /// Relative redirect carrying a toast in its query string
    pub fn toast_redirect(
        &self,
        path: &str,
        kind: ToastKind,
        name: &str,
        description: &str,
        disable_button: bool,
        extra_params: &str,
    ) -> String {
        let (name_key, description_key) = kind.keys();
        let mut redirect = format!("{}?{}={}", path, name_key, encode(name));

        if !description.is_empty() {
            redirect.push_str(&format!("&{}={}", description_key, encode(description)));
        }
        if disable_button {
            redirect.push_str("&disable_button=true");
        }
        if !extra_params.is_empty() {
            redirect.push('&');
            redirect.push_str(extra_params);
        }

        redirect
    }

    pub fn error_redirect(&self, path: &str, name: &str, description: &str) -> String {
        self.toast_redirect(path, ToastKind::Error, name, description, false, "")
    }

    pub fn status_redirect(&self, path: &str, name: &str, description: &str) -> String {
        self.toast_redirect(path, ToastKind::Status, name, description, false, "")
    }
}

impl Default for RedirectFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_normalization() {
        assert_eq!(RedirectFormatter::new("").site_url(), "http://localhost:3000");
        assert_eq!(
            RedirectFormatter::new("https://app.example.com///").site_url(),
            "https://app.example.com"
        );
        assert_eq!(
            RedirectFormatter::new("preview-123.vercel.app").site_url(),
            "https://preview-123.vercel.app"
        );
    }

    #[test]
    fn test_url_join() {
        let redirects = RedirectFormatter::new("https://app.example.com/");

        assert_eq!(redirects.url(""), "https://app.example.com");
        assert_eq!(
            redirects.url("/account?reference=sub_1"),
            "https://app.example.com/account?reference=sub_1"
        );
        assert_eq!(redirects.url("//pricing"), "https://app.example.com/pricing");
    }

    #[test]
    fn test_error_redirect_encoding() {
        let redirects = RedirectFormatter::default();

        assert_eq!(
            redirects.error_redirect(
                "/account",
                "Could not get user session.",
                "Please try again later or contact a system administrator."
            ),
            "/account?error=Could%20not%20get%20user%20session.\
             &error_description=Please%20try%20again%20later%20or%20contact%20a%20system%20administrator."
        );

        assert_eq!(
            redirects.error_redirect("/account", "a&b=c (d)", ""),
            "/account?error=a%26b%3Dc%20(d)"
        );
    }

    #[test]
    fn test_status_redirect_options() {
        let redirects = RedirectFormatter::default();

        assert_eq!(
            redirects.status_redirect("/account", "Success!", "Subscribed"),
            "/account?status=Success!&status_description=Subscribed"
        );
        assert_eq!(
            redirects.toast_redirect("/signin", ToastKind::Error, "Oops", "", true, "tab=billing"),
            "/signin?error=Oops&disable_button=true&tab=billing"
        );
    }
}
