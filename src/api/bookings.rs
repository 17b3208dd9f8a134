use actix_web::{web, HttpResponse};

use super::EmailQuery;
use crate::middleware::Authenticated;
use crate::models::{BookingResponse, InsertedResponse, NewBookingRequest, Role};
use crate::services::{authorization, booking_service};
use crate::state::AppState;
use crate::store::DeleteOutcome;
use crate::utils::ApiError;

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "The caller's open bookings", body = [BookingResponse]),
        (status = 401, description = "Missing token or email mismatch")
    )
)]
pub async fn list_bookings(
    state: web::Data<AppState>,
    auth: Authenticated,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let bookings =
        booking_service::list_bookings(&state.stores, auth.claims(), query.email.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = NewBookingRequest,
    responses(
        (status = 200, description = "Booking stored", body = InsertedResponse),
        (status = 401, description = "Booking email differs from the token"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "No such class")
    )
)]
pub async fn create_booking(
    state: web::Data<AppState>,
    auth: Authenticated,
    body: web::Json<NewBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Student).await?;
    log::info!("🎟️ POST /bookings - class {} for {}", body.class_id, auth.email());

    let inserted = booking_service::create_booking(&state.stores, auth.claims(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(inserted))
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled", body = DeleteOutcome),
        (status = 404, description = "No such booking owned by the caller")
    )
)]
pub async fn cancel_booking(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("❌ DELETE /bookings/{} - by {}", path, auth.email());
    let outcome = booking_service::cancel_booking(&state.stores, auth.claims(), &path).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
