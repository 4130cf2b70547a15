//! UPI deep links for the common payment apps and a scannable QR code.

use serde::Serialize;
use urlencoding::encode;

use crate::config::UpiConfig;

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiLinks {
    pub upi_link: String,
    pub gpay_link: String,
    pub phonepe_link: String,
    pub paytm_link: String,
    pub qr_code_url: String,
    pub vpa: String,
    pub merchant_name: String,
}

pub fn links(config: &UpiConfig, amount: f64, currency: &str, receipt: &str) -> UpiLinks {
    let note = format!("Payment for {} Order {}", config.merchant_name, receipt);
    let query = format!(
        "pa={}&pn={}&am={:.2}&cu={}&tn={}",
        config.merchant_id,
        encode(&config.merchant_name),
        amount,
        currency,
        encode(&note)
    );
    let upi_link = format!("upi://pay?{query}&mode=02&purpose=00");

    UpiLinks {
        gpay_link: format!("tez://upi/pay?{query}"),
        phonepe_link: format!("phonepe://pay?{query}"),
        paytm_link: format!("paytmmp://upi/pay?{query}"),
        qr_code_url: format!("{QR_SERVICE}{}", encode(&upi_link)),
        upi_link,
        vpa: config.merchant_id.clone(),
        merchant_name: config.merchant_name.clone(),
    }
}
