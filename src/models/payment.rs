use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Settled purchase. Written once and never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub class_id: String,
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Unix timestamp of settlement
    pub paid_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Body of `POST /payments`, sent once the gateway confirmed the charge.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentRequest {
    pub email: String,
    /// Class being paid for
    pub class_id: String,
    /// Reservation consumed by this payment
    pub booking_id: String,
    pub class_name: Option<String>,
    pub price: f64,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
    pub inserted_id: String,
    pub deleted_count: u64,
    /// Seat count read before this settlement took its seat
    pub updated_seats: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub email: String,
    pub class_id: String,
    pub booking_id: String,
    pub class_name: Option<String>,
    pub price: f64,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
    pub paid_at: i64,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            id: payment.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: payment.email,
            class_id: payment.class_id,
            booking_id: payment.booking_id,
            class_name: payment.class_name,
            price: payment.price,
            transaction_id: payment.transaction_id,
            payment_method: payment.payment_method,
            paid_at: payment.paid_at,
        }
    }
}
