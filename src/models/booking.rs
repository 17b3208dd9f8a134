use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Pending reservation of one seat, consumed by settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Student who reserved the seat
    pub email: String,

    /// Hex id of the reserved class
    pub class_id: String,

    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_image: Option<String>,

    #[serde(default)]
    pub instructor: String,

    pub price: f64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    pub class_id: String,
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub email: String,
    pub class_id: String,
    pub class_name: String,
    pub class_image: Option<String>,
    pub instructor: String,
    pub price: f64,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        BookingResponse {
            id: booking.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: booking.email,
            class_id: booking.class_id,
            class_name: booking.class_name,
            class_image: booking.class_image,
            instructor: booking.instructor,
            price: booking.price,
        }
    }
}
