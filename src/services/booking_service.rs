use crate::models::{Booking, BookingResponse, InsertedResponse, NewBookingRequest};
use crate::services::authorization::require_self;
use crate::services::token_service::IdentityClaims;
use crate::store::{DeleteOutcome, Stores};
use crate::utils::{parse_object_id, ApiError};

pub async fn list_bookings(
    stores: &Stores,
    identity: &IdentityClaims,
    email: Option<&str>,
) -> Result<Vec<BookingResponse>, ApiError> {
    let Some(email) = email else {
        return Ok(Vec::new());
    };
    require_self(identity, email)?;

    let bookings = stores.bookings.list_by_email(email).await?;
    Ok(bookings.into_iter().map(BookingResponse::from).collect())
}

/// Reserves a seat ahead of payment. Class name, instructor and price are
/// copied from the class record, not from the request.
pub async fn create_booking(
    stores: &Stores,
    identity: &IdentityClaims,
    request: NewBookingRequest,
) -> Result<InsertedResponse, ApiError> {
    require_self(identity, &request.email)?;
    let class_id = parse_object_id(&request.class_id)?;

    let class = stores
        .classes
        .find_by_id(&class_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Class"))?;

    let booking = Booking {
        id: None,
        email: request.email,
        class_id: class_id.to_hex(),
        class_name: class.class_name,
        class_image: class.class_image,
        instructor: class.instructor,
        price: class.price,
    };

    let id = stores.bookings.insert(&booking).await?;
    log::info!("📝 Booking {} created for {}", id, booking.email);
    Ok(InsertedResponse {
        inserted_id: id.to_hex(),
    })
}

/// Cancels one of the caller's own bookings.
pub async fn cancel_booking(
    stores: &Stores,
    identity: &IdentityClaims,
    booking_id: &str,
) -> Result<DeleteOutcome, ApiError> {
    let id = parse_object_id(booking_id)?;
    let outcome = stores.bookings.delete(&id, &identity.email).await?;
    if outcome.deleted_count == 0 {
        return Err(ApiError::not_found("Booking"));
    }
    Ok(outcome)
}
