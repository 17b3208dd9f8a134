//! Payment intent creation and settlement.
//!
//! Settlement order:
//! 1. take one seat with a conditional decrement (`availableSeats > 0`);
//! 2. consume the booking (find-and-delete, so only one settlement gets it);
//! 3. insert the payment record.
//!
//! Each completed step records its undo action. When a later step fails the
//! undo actions run in reverse, so a rejected settlement leaves no payment,
//! keeps the booking and returns the seat.

use mongodb::bson::oid::ObjectId;

use crate::gateway::PaymentGateway;
use crate::models::{
    Booking, Payment, PaymentIntentRequest, PaymentIntentResponse, PaymentResponse,
    SettlePaymentRequest, SettlementReceipt,
};
use crate::services::authorization::require_self;
use crate::services::token_service::IdentityClaims;
use crate::store::Stores;
use crate::utils::{parse_object_id, ApiError};

pub const PAYMENT_METHOD_TYPES: &[&str] = &["card"];

/// Converts a major-unit price (e.g. dollars) to gateway minor units.
pub fn to_minor_units(price: f64) -> Result<i64, ApiError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ApiError::BadRequest("price must be a positive amount".to_string()));
    }
    Ok((price * 100.0).round() as i64)
}

/// A settlement must pay the booked price, compared in minor units.
fn price_matches(paid: f64, booked: f64) -> bool {
    paid.is_finite() && paid > 0.0 && (paid * 100.0).round() == (booked * 100.0).round()
}

/// Creates a gateway intent and hands its client secret back to the caller.
/// No link is kept between the intent and a later settlement.
pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    currency: &str,
    request: PaymentIntentRequest,
) -> Result<PaymentIntentResponse, ApiError> {
    let amount = to_minor_units(request.price)?;
    let intent = gateway
        .create_payment_intent(amount, currency, PAYMENT_METHOD_TYPES)
        .await?;
    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

pub async fn list_payments(
    stores: &Stores,
    identity: &IdentityClaims,
    email: Option<&str>,
) -> Result<Vec<PaymentResponse>, ApiError> {
    let Some(email) = email else {
        return Ok(Vec::new());
    };
    require_self(identity, email)?;

    let payments = stores.payments.list_by_email(email).await?;
    Ok(payments.into_iter().map(PaymentResponse::from).collect())
}

enum Compensation {
    ReleaseSeat(ObjectId),
    RestoreBooking(Booking),
}

#[derive(Default)]
struct CompensationLog {
    steps: Vec<Compensation>,
}

impl CompensationLog {
    fn record(&mut self, step: Compensation) {
        self.steps.push(step);
    }

    async fn rollback(self, stores: &Stores) {
        for step in self.steps.into_iter().rev() {
            match step {
                Compensation::ReleaseSeat(class_id) => {
                    if let Err(e) = stores.classes.release_seat(&class_id).await {
                        log::error!("❌ Could not release seat of class {}: {}", class_id, e);
                    }
                }
                Compensation::RestoreBooking(booking) => {
                    if let Err(e) = stores.bookings.restore(&booking).await {
                        log::error!("❌ Could not restore booking {:?}: {}", booking.id, e);
                    }
                }
            }
        }
    }
}

/// Finalizes a purchase once the gateway confirmed the charge.
pub async fn settle(
    stores: &Stores,
    identity: &IdentityClaims,
    request: SettlePaymentRequest,
) -> Result<SettlementReceipt, ApiError> {
    require_self(identity, &request.email)?;
    let class_id = parse_object_id(&request.class_id)?;
    let booking_id = parse_object_id(&request.booking_id)?;

    let mut undo = CompensationLog::default();
    match apply_settlement(stores, &request, class_id, booking_id, &mut undo).await {
        Ok(receipt) => {
            log::info!(
                "💰 Settled booking {} for {} (seats before: {})",
                request.booking_id,
                request.email,
                receipt.updated_seats
            );
            Ok(receipt)
        }
        Err(e) => {
            undo.rollback(stores).await;
            Err(e)
        }
    }
}

async fn apply_settlement(
    stores: &Stores,
    request: &SettlePaymentRequest,
    class_id: ObjectId,
    booking_id: ObjectId,
    undo: &mut CompensationLog,
) -> Result<SettlementReceipt, ApiError> {
    let Some(class) = stores.classes.take_seat(&class_id).await? else {
        return Err(match stores.classes.find_by_id(&class_id).await? {
            Some(_) => ApiError::NoAvailableSeats,
            None => ApiError::not_found("Class"),
        });
    };
    undo.record(Compensation::ReleaseSeat(class_id));

    let booking = stores
        .bookings
        .take(&booking_id, &request.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking"))?;
    let booked_class = booking.class_id.clone();
    let booked_price = booking.price;
    undo.record(Compensation::RestoreBooking(booking));

    if booked_class != class_id.to_hex() {
        return Err(ApiError::BadRequest(
            "booking does not belong to this class".to_string(),
        ));
    }
    if !price_matches(request.price, booked_price) {
        return Err(ApiError::BadRequest(
            "price does not match the booking".to_string(),
        ));
    }

    let payment = Payment {
        id: None,
        email: request.email.clone(),
        class_id: class_id.to_hex(),
        booking_id: booking_id.to_hex(),
        class_name: request.class_name.clone().or(Some(class.class_name)),
        price: booked_price,
        transaction_id: request.transaction_id.clone(),
        payment_method: request.payment_method.clone(),
        paid_at: chrono::Utc::now().timestamp(),
    };
    let inserted = stores.payments.insert(&payment).await?;

    Ok(SettlementReceipt {
        inserted_id: inserted.to_hex(),
        deleted_count: 1,
        updated_seats: class.available_seats,
    })
}
