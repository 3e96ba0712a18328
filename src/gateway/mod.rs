//! Payment gateway client
//!
//! Thin wrapper over the Razorpay orders API. Order creation is a JSON
//! call authenticated with the key pair; checkout completion is verified
//! by recomputing the HMAC-SHA256 signature the widget hands back.

use anyhow::{Context, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Order as created on the gateway
#[derive(Debug, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Gateway operations needed by the payment workflow
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
        notes: serde_json::Value,
    ) -> Result<GatewayOrder>;

    /// Check the checkout signature against this gateway's secret
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Public key id, handed to the checkout widget
    fn key_id(&self) -> &str;
}

/// Razorpay REST client
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.razorpay.com/v1".to_string(),
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
        notes: serde_json::Value,
    ) -> Result<GatewayOrder> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
                "notes": notes,
            }))
            .send()
            .await
            .context("gateway order request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("gateway rejected order creation: {}", status);
        }

        response
            .json::<GatewayOrder>()
            .await
            .context("malformed gateway order response")
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_checkout_signature(&self.key_secret, order_id, payment_id, signature)
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Verify `HMAC-SHA256(order_id + "|" + payment_id)` in constant time
pub fn verify_checkout_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_known_signature() {
        // Independently computed vector for secret "test_secret"
        let signature = "8182c68ef8933c9aacfef8f81b44fdcaa1d981621b6f7ec375c0918ddcc9877b";
        assert!(verify_checkout_signature(
            "test_secret",
            "order_MkCeA1",
            "pay_N9dvz2",
            signature
        ));
    }

    #[test]
    fn accepts_what_checkout_produces() {
        let signature = sign("secret", "order_1", "pay_1");
        assert!(verify_checkout_signature("secret", "order_1", "pay_1", &signature));
    }

    #[test]
    fn rejects_tampered_payment_id() {
        let signature = sign("secret", "order_1", "pay_1");
        assert!(!verify_checkout_signature("secret", "order_1", "pay_2", &signature));
    }

    #[test]
    fn rejects_wrong_secret() {
        let signature = sign("secret", "order_1", "pay_1");
        assert!(!verify_checkout_signature("other", "order_1", "pay_1", &signature));
    }

    #[test]
    fn rejects_non_hex_signature() {
        assert!(!verify_checkout_signature("secret", "order_1", "pay_1", "zz-not-hex"));
    }
}
