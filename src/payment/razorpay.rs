//! Razorpay checkout: simulated gateway orders and payment signature checks.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEMO_KEY_ID: &str = "rzp_test_demo_key";

/// Gateway order as handed to the checkout widget. Amounts are in paise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayOrder {
    pub id: String,
    pub entity: &'static str,
    pub amount: u64,
    pub amount_paid: u64,
    pub amount_due: u64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: &'static str,
    pub created_at: i64,
    pub user_id: String,
}

impl GatewayOrder {
    pub fn new(id: String, amount_paise: u64, currency: String, receipt: Option<String>, user_id: String) -> Self {
        Self {
            id,
            entity: "order",
            amount: amount_paise,
            amount_paid: 0,
            amount_due: amount_paise,
            currency,
            receipt,
            status: "created",
            created_at: Utc::now().timestamp(),
            user_id,
        }
    }
}

/// Constant-time check of a hex signature sent back by the checkout widget.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_signature_roundtrip_and_tamper() {
        let signature = sign("live-secret", "order_1", "pay_1").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(verify_signature("live-secret", "order_1", "pay_1", &signature));
        assert!(!verify_signature("live-secret", "order_1", "pay_2", &signature));
        assert!(!verify_signature("other-secret", "order_1", "pay_1", &signature));
        assert!(!verify_signature("live-secret", "order_1", "pay_1", "not-hex"));
    }

    #[test]
    fn test_gateway_order_amounts() {
        let order = GatewayOrder::new("order_x".into(), 599_900, "INR".into(), Some("rcpt_1".into()), "user_1".into());
        assert_eq!(order.amount_due, 599_900);
        assert_eq!(order.amount_paid, 0);
        assert_eq!(order.status, "created");
    }
}
