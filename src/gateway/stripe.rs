use async_trait::async_trait;
use serde::Deserialize;

use super::{GatewayError, PaymentGateway, PaymentIntent};

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe REST client (form-encoded requests, bearer secret key).
pub struct StripeGateway {
    http: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(base_url: &str, secret_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.filter(|key| !key.is_empty()),
        }
    }

    fn intent_form(amount: i64, currency: &str, method_types: &[&str]) -> Vec<(String, String)> {
        let mut form = vec![
            ("amount".to_string(), amount.to_string()),
            ("currency".to_string(), currency.to_string()),
        ];
        for method in method_types {
            form.push(("payment_method_types[]".to_string(), method.to_string()));
        }
        form
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        method_types: &[&str],
    ) -> Result<PaymentIntent, GatewayError> {
        let secret_key = self.secret_key.as_deref().ok_or(GatewayError::NotConfigured)?;

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .bearer_auth(secret_key)
            .form(&Self::intent_form(amount_minor_units, currency, method_types))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let intent = response.json::<PaymentIntent>().await?;
        log::info!("💳 Payment intent {} created ({} {})", intent.id, amount_minor_units, currency);
        Ok(intent)
    }
}
