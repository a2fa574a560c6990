//! # Price Types
//!
//! Billing prices for paystack-checkout.
//! Prices are loaded from `config/prices.toml` and mirror the `prices` table:
//! the `id` is the Paystack plan code sent with every checkout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currencies Paystack settles in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[serde(alias = "ngn")]
    NGN,
    #[serde(alias = "ghs")]
    GHS,
    #[serde(alias = "zar")]
    ZAR,
    #[serde(alias = "kes")]
    KES,
    #[serde(alias = "usd")]
    USD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::GHS => "GHS",
            Currency::ZAR => "ZAR",
            Currency::KES => "KES",
            Currency::USD => "USD",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "₦",
            Currency::GHS => "GH₵",
            Currency::ZAR => "R",
            Currency::KES => "KSh",
            Currency::USD => "$",
        }
    }

    /// Paystack amounts are always in the hundredth subunit (kobo, pesewas, cents)
    pub fn decimal_places(&self) -> u8 {
        2
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::NGN
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-off or recurring price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    OneTime,
    Recurring,
}

impl Default for PriceType {
    fn default() -> Self {
        PriceType::Recurring
    }
}

/// Billing interval for recurring prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

/// A billing price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Paystack plan code (e.g., "PLN_gx2wn530m0i3w3m")
    pub id: String,

    /// Owning product, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Whether the price can be purchased
    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Amount in the currency's smallest unit
    #[serde(default)]
    pub unit_amount: Option<i64>,

    #[serde(default)]
    pub currency: Currency,

    #[serde(rename = "type", default)]
    pub price_type: PriceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Price {
    /// Create a recurring price for a Paystack plan
    pub fn recurring(
        id: impl Into<String>,
        unit_amount: i64,
        currency: Currency,
        interval: BillingInterval,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: None,
            active: true,
            description: None,
            unit_amount: Some(unit_amount),
            currency,
            price_type: PriceType::Recurring,
            interval: Some(interval),
            interval_count: Some(1),
            trial_period_days: None,
            metadata: HashMap::new(),
        }
    }

    /// Create a one-time price
    pub fn one_time(id: impl Into<String>, unit_amount: i64, currency: Currency) -> Self {
        Self {
            price_type: PriceType::OneTime,
            interval: None,
            interval_count: None,
            ..Self::recurring(id, unit_amount, currency, BillingInterval::Month)
        }
    }

    /// Builder: set owning product
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.price_type, PriceType::Recurring)
    }

    /// Format for display (e.g., "₦5000.00"); `None` when the amount is unset
    pub fn display(&self) -> Option<String> {
        self.unit_amount.map(|amount| {
            format!(
                "{}{:.2}",
                self.currency.symbol(),
                self.currency.from_smallest_unit(amount)
            )
        })
    }
}

/// Price catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceCatalog {
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self { prices: Vec::new() }
    }

    pub fn add(&mut self, price: Price) {
        self.prices.push(price);
    }

    /// Builder: add a price
    pub fn with_price(mut self, price: Price) -> Self {
        self.add(price);
        self
    }

    /// Find a price by plan code
    pub fn get(&self, id: &str) -> Option<&Price> {
        self.prices.iter().find(|p| p.id == id)
    }

    pub fn active_prices(&self) -> impl Iterator<Item = &Price> {
        self.prices.iter().filter(|p| p.active)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::recurring("PLN_basic", 500_000, Currency::NGN, BillingInterval::Month);
        assert_eq!(price.display().as_deref(), Some("₦5000.00"));

        let mut unpriced = Price::one_time("PLN_free", 0, Currency::USD);
        unpriced.unit_amount = None;
        assert_eq!(unpriced.display(), None);
    }

    #[test]
    fn test_one_time_price() {
        let price = Price::one_time("PLN_once", 1999, Currency::USD).with_description("Lifetime");

        assert!(!price.is_recurring());
        assert_eq!(price.interval, None);
        assert_eq!(price.description.as_deref(), Some("Lifetime"));
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = PriceCatalog::from_toml(
            r#"
            [[prices]]
            id = "PLN_monthly"
            product_id = "prod_pro"
            unit_amount = 250000
            currency = "ngn"
            type = "recurring"
            interval = "month"
            interval_count = 1

            [[prices]]
            id = "PLN_legacy"
            active = false
            unit_amount = 1000
            currency = "USD"
            type = "one_time"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);

        let monthly = catalog.get("PLN_monthly").unwrap();
        assert_eq!(monthly.currency, Currency::NGN);
        assert_eq!(monthly.interval, Some(BillingInterval::Month));
        assert!(monthly.is_recurring());

        let legacy = catalog.get("PLN_legacy").unwrap();
        assert!(!legacy.active);
        assert_eq!(legacy.price_type, PriceType::OneTime);

        let active: Vec<_> = catalog.active_prices().map(|p| p.id.as_str()).collect();
        assert_eq!(active, vec!["PLN_monthly"]);
    }
}
