//! Payment flows. Each verified payment turns into a placed order.

mod error;
pub mod razorpay;
pub mod upi;

pub use error::PaymentError;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::clients::{OrderClient, PlaceOrder};
use crate::config::{RazorpayConfig, UpiConfig};
use crate::domain::{CustomerDetails, Order, OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus};
use crate::product_actor::StockLine;
use razorpay::GatewayOrder;
use upi::UpiLinks;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Unique-per-process reference such as `upi_1718000000000123_4`.
fn reference(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{}_{seq}", Utc::now().timestamp_micros())
}

fn to_paise(amount: f64) -> Result<u64, PaymentError> {
    if amount.is_finite() && amount > 0.0 {
        Ok((amount * 100.0).round() as u64)
    } else {
        Err(PaymentError::InvalidAmount(amount))
    }
}

/// Cart contents and shipping details submitted with a payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub items: Vec<StockLine>,
    #[serde(alias = "shippingInfo")]
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub receipt: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "orderData")]
    pub order: Option<CheckoutData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiVerification {
    pub order_id: Option<String>,
    #[serde(rename = "orderData")]
    pub order: Option<CheckoutData>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RazorpayOrder {
    pub order: GatewayOrder,
    pub key_id: String,
    pub demo_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiOrder {
    pub order: GatewayOrder,
    #[serde(flatten)]
    pub links: UpiLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentOption {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<PaymentOption>,
}

#[derive(Clone)]
pub struct PaymentService {
    razorpay: RazorpayConfig,
    upi: UpiConfig,
    order_client: OrderClient,
}

impl PaymentService {
    pub fn new(razorpay: RazorpayConfig, upi: UpiConfig, order_client: OrderClient) -> Self {
        Self {
            razorpay,
            upi,
            order_client,
        }
    }

    #[instrument(skip(self, request))]
    pub fn create_razorpay_order(&self, user_id: &str, request: PaymentRequest) -> Result<RazorpayOrder, PaymentError> {
        let amount = to_paise(request.amount)?;
        let order = GatewayOrder::new(
            reference("order"),
            amount,
            request.currency,
            request.receipt,
            user_id.to_string(),
        );
        info!(gateway_order_id = %order.id, amount, "Gateway order created");

        Ok(RazorpayOrder {
            order,
            key_id: self
                .razorpay
                .key_id
                .clone()
                .unwrap_or_else(|| razorpay::DEMO_KEY_ID.to_string()),
            demo_mode: self.razorpay.is_demo() || self.razorpay.key_id.is_none(),
        })
    }

    #[instrument(skip(self, request))]
    pub fn create_upi_order(&self, user_id: &str, request: PaymentRequest) -> Result<UpiOrder, PaymentError> {
        let amount = to_paise(request.amount)?;
        let receipt = request.receipt.clone().unwrap_or_else(|| reference("rcpt"));
        let links = upi::links(&self.upi, request.amount, &request.currency, &receipt);
        let order = GatewayOrder::new(
            reference("upi_order"),
            amount,
            request.currency,
            Some(receipt),
            user_id.to_string(),
        );
        info!(gateway_order_id = %order.id, amount, "UPI order created");

        Ok(UpiOrder { order, links })
    }

    /// Checks the gateway signature, then places a paid order.
    #[instrument(skip(self, verification), fields(payment_id = %verification.razorpay_payment_id))]
    pub async fn verify_razorpay(&self, user_id: &str, verification: RazorpayVerification) -> Result<Order, PaymentError> {
        match self.razorpay.key_secret.as_deref() {
            Some(secret) if !self.razorpay.is_demo() => {
                let valid = razorpay::verify_signature(
                    secret,
                    &verification.razorpay_order_id,
                    &verification.razorpay_payment_id,
                    &verification.razorpay_signature,
                );
                if !valid {
                    warn!("Razorpay signature mismatch");
                    return Err(PaymentError::InvalidSignature);
                }
            }
            _ => warn!("Demo mode, skipping Razorpay signature verification"),
        }

        let checkout = verification.order.ok_or(PaymentError::MissingField("orderData"))?;
        let payment = PaymentDetails {
            method: PaymentMethod::Razorpay,
            payment_id: verification.razorpay_payment_id,
            gateway_order_id: Some(verification.razorpay_order_id),
            signature: Some(verification.razorpay_signature),
        };
        self.place(user_id, checkout, payment, PaymentStatus::Paid).await
    }

    /// UPI apps give no server-side proof, so the confirmation is trusted as paid.
    #[instrument(skip(self, verification))]
    pub async fn verify_upi(&self, user_id: &str, verification: UpiVerification) -> Result<Order, PaymentError> {
        let checkout = verification.order.ok_or(PaymentError::MissingField("orderData"))?;
        let payment = PaymentDetails {
            method: PaymentMethod::Upi,
            payment_id: reference("upi"),
            gateway_order_id: verification.order_id,
            signature: None,
        };
        self.place(user_id, checkout, payment, PaymentStatus::Paid).await
    }

    #[instrument(skip(self, checkout))]
    pub async fn place_cod(&self, user_id: &str, checkout: CheckoutData) -> Result<Order, PaymentError> {
        let payment = PaymentDetails {
            method: PaymentMethod::Cod,
            payment_id: reference("cod"),
            gateway_order_id: None,
            signature: None,
        };
        self.place(user_id, checkout, payment, PaymentStatus::Pending).await
    }

    pub fn payment_methods(&self) -> Vec<PaymentMethodInfo> {
        vec![
            PaymentMethodInfo {
                id: "upi",
                name: "UPI",
                description: "Pay using any UPI app",
                options: vec![
                    PaymentOption { id: "gpay", name: "Google Pay" },
                    PaymentOption { id: "phonepe", name: "PhonePe" },
                    PaymentOption { id: "paytm", name: "Paytm" },
                    PaymentOption { id: "bhim", name: "BHIM UPI" },
                    PaymentOption { id: "other_upi", name: "Other UPI Apps" },
                ],
            },
            PaymentMethodInfo {
                id: "cod",
                name: "Cash on Delivery",
                description: "Pay when you receive the order",
                options: Vec::new(),
            },
        ]
    }

    async fn place(
        &self,
        user_id: &str,
        checkout: CheckoutData,
        payment: PaymentDetails,
        payment_status: PaymentStatus,
    ) -> Result<Order, PaymentError> {
        let order = self
            .order_client
            .place_order(PlaceOrder {
                user_id: user_id.to_string(),
                items: checkout.items,
                customer: checkout.customer,
                payment,
                status: OrderStatus::Confirmed,
                payment_status,
            })
            .await?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_validation() {
        assert_eq!(to_paise(59.99), Ok(5999));
        assert_eq!(to_paise(0.0), Err(PaymentError::InvalidAmount(0.0)));
        assert!(to_paise(f64::NAN).is_err());
    }

    #[test]
    fn test_references_are_unique() {
        assert_ne!(reference("upi"), reference("upi"));
        assert!(reference("cod").starts_with("cod_"));
    }
}
