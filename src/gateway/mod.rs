//! External payment gateway. Only intent creation is needed: confirmation
//! happens client-side and is reported back through `POST /payments`.

pub mod stripe;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use stripe::StripeGateway;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("payment gateway is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        method_types: &[&str],
    ) -> Result<PaymentIntent, GatewayError>;
}
