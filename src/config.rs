use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{OrderItem, OrderSummary};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// How an order total is put together from its items.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub tax_rate: f64,
    pub shipping_fee: f64,
    /// Subtotal at or above which shipping is free. Zero keeps the fee on every order.
    pub free_shipping_over: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: 0.18,
            shipping_fee: 0.0,
            free_shipping_over: 0.0,
        }
    }
}

impl Pricing {
    pub fn summarize(&self, items: &[OrderItem]) -> OrderSummary {
        let subtotal: f64 = items.iter().map(|item| item.price * f64::from(item.quantity)).sum();
        let free = self.free_shipping_over > 0.0 && subtotal >= self.free_shipping_over;
        let shipping = if free { 0.0 } else { self.shipping_fee };
        let tax = (subtotal * self.tax_rate).round();

        OrderSummary {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
}

impl RazorpayConfig {
    /// Signature checks are skipped without a real secret.
    pub fn is_demo(&self) -> bool {
        matches!(self.key_secret.as_deref(), None | Some("") | Some("demo_secret"))
    }
}

#[derive(Debug, Clone)]
pub struct UpiConfig {
    pub merchant_id: String,
    pub merchant_name: String,
}

/// Account promoted to admin at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub razorpay: RazorpayConfig,
    pub upi: UpiConfig,
    pub pricing: Pricing,
    pub actor_buffer: usize,
    pub seed_sample_catalog: bool,
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let jwt_secret = optional("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let admin = optional("ADMIN_EMAIL").map(|email| AdminSeed {
            email,
            name: optional("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
        });

        let config = Self {
            port: try_load("PORT", "5000")?,
            jwt_secret,
            jwt_ttl_hours: try_load("JWT_TTL_HOURS", "168")?,
            razorpay: RazorpayConfig {
                key_id: optional("RAZORPAY_KEY_ID"),
                key_secret: optional("RAZORPAY_KEY_SECRET"),
            },
            upi: UpiConfig {
                merchant_id: try_load("MERCHANT_UPI_ID", "electricstore@paytm")?,
                merchant_name: try_load("MERCHANT_NAME", "Electric Store")?,
            },
            pricing: Pricing {
                tax_rate: try_load("TAX_RATE", "0.18")?,
                shipping_fee: try_load("SHIPPING_FEE", "0")?,
                free_shipping_over: try_load("FREE_SHIPPING_OVER", "0")?,
            },
            actor_buffer: try_load("ACTOR_BUFFER", "32")?,
            seed_sample_catalog: try_load("SEED_SAMPLE_CATALOG", "true")?,
            admin,
        };

        if config.razorpay.is_demo() {
            warn!("RAZORPAY_KEY_SECRET not configured, payment signatures will not be verified");
        }
        if config.actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// Fixed configuration for tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_hours: 1,
            razorpay: RazorpayConfig::default(),
            upi: UpiConfig {
                merchant_id: "electricstore@paytm".to_string(),
                merchant_name: "Electric Store".to_string(),
            },
            pricing: Pricing::default(),
            actor_buffer: 32,
            seed_sample_catalog: false,
            admin: None,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    optional(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, price: f64) -> OrderItem {
        OrderItem {
            product_id: "product_1".into(),
            name: "Ceiling Fan".into(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_summary_rounds_tax() {
        let summary = Pricing::default().summarize(&[item(2, 2499.0), item(1, 199.0)]);
        assert_eq!(summary.subtotal, 5197.0);
        assert_eq!(summary.tax, 935.0);
        assert_eq!(summary.total, 6132.0);
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_item_count_does_not_wrap_at_u32_max() {
        let summary = Pricing::default().summarize(&[item(u32::MAX, 1.0), item(u32::MAX, 1.0), item(1, 1.0)]);
        assert_eq!(summary.item_count, 2 * u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_shipping_waived_over_threshold() {
        let pricing = Pricing {
            tax_rate: 0.0,
            shipping_fee: 50.0,
            free_shipping_over: 1000.0,
        };
        assert_eq!(pricing.summarize(&[item(1, 500.0)]).shipping, 50.0);
        assert_eq!(pricing.summarize(&[item(2, 500.0)]).shipping, 0.0);

        let always = Pricing {
            free_shipping_over: 0.0,
            ..pricing
        };
        assert_eq!(always.summarize(&[item(10, 500.0)]).total, 5050.0);
    }

    #[test]
    fn test_demo_mode() {
        let mut razorpay = RazorpayConfig::default();
        assert!(razorpay.is_demo());
        razorpay.key_secret = Some("demo_secret".into());
        assert!(razorpay.is_demo());
        razorpay.key_secret = Some("live".into());
        assert!(!razorpay.is_demo());
    }
}
