use actix_web::{web, HttpResponse};

use super::EmailQuery;
use crate::middleware::Authenticated;
use crate::models::{
    PaymentIntentRequest, PaymentIntentResponse, PaymentResponse, Role, SettlePaymentRequest,
    SettlementReceipt,
};
use crate::services::{authorization, payment_service};
use crate::state::AppState;
use crate::utils::ApiError;

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret of the new intent", body = PaymentIntentResponse),
        (status = 400, description = "Price is not a positive amount"),
        (status = 403, description = "Caller is not a student"),
        (status = 500, description = "Gateway unavailable or not configured")
    )
)]
pub async fn create_payment_intent(
    state: web::Data<AppState>,
    auth: Authenticated,
    body: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Student).await?;
    log::info!("💳 POST /create-payment-intent - {} by {}", body.price, auth.email());

    let response =
        payment_service::create_intent(&*state.gateway, &state.currency, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "The caller's payment history", body = [PaymentResponse]),
        (status = 401, description = "Missing token or email mismatch"),
        (status = 403, description = "Caller is not a student")
    )
)]
pub async fn list_payments(
    state: web::Data<AppState>,
    auth: Authenticated,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Student).await?;

    let payments =
        payment_service::list_payments(&state.stores, auth.claims(), query.email.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(payments))
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = SettlePaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, booking consumed, seat taken", body = SettlementReceipt),
        (status = 400, description = "No seats left, or booking belongs to another class"),
        (status = 401, description = "Payment email differs from the token"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Class or booking not found")
    )
)]
pub async fn settle_payment(
    state: web::Data<AppState>,
    auth: Authenticated,
    body: web::Json<SettlePaymentRequest>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Student).await?;
    log::info!("💰 POST /payments - booking {} by {}", body.booking_id, auth.email());

    let receipt = payment_service::settle(&state.stores, auth.claims(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(receipt))
}
