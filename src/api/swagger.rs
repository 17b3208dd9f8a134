use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Camp Booking Service API",
        version = "1.0.0",
        description = "Camp class booking backend.\n\n**Authentication:** obtain a token from `POST /jwt` and send it as `Authorization: Bearer <token>`. Role checks read the stored user, not the token."
    ),
    paths(
        crate::api::health::health_check,
        crate::api::tokens::issue_token,
        crate::api::users::list_users,
        crate::api::users::register_user,
        crate::api::users::check_role,
        crate::api::users::change_role,
        crate::api::users::delete_user,
        crate::api::classes::list_classes,
        crate::api::classes::propose_class,
        crate::api::classes::review_class,
        crate::api::classes::list_my_classes,
        crate::api::classes::update_my_class,
        crate::api::classes::list_instructors,
        crate::api::bookings::list_bookings,
        crate::api::bookings::create_booking,
        crate::api::bookings::cancel_booking,
        crate::api::payments::create_payment_intent,
        crate::api::payments::list_payments,
        crate::api::payments::settle_payment,
        crate::api::admin::admin_stats,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::token_service::IdentityRequest,
            crate::services::token_service::TokenResponse,
            crate::models::Role,
            crate::models::UserResponse,
            crate::models::RegisterUserRequest,
            crate::models::RegisterResponse,
            crate::models::RoleChangeResponse,
            crate::models::ClassStatus,
            crate::models::ClassResponse,
            crate::models::NewClassRequest,
            crate::models::ReviewClassRequest,
            crate::models::ClassDetails,
            crate::models::InstructorResponse,
            crate::models::BookingResponse,
            crate::models::NewBookingRequest,
            crate::models::PaymentIntentRequest,
            crate::models::PaymentIntentResponse,
            crate::models::SettlePaymentRequest,
            crate::models::SettlementReceipt,
            crate::models::PaymentResponse,
            crate::models::AdminStats,
            crate::models::InsertedResponse,
            crate::store::UpdateOutcome,
            crate::store::DeleteOutcome,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database probe."),
        (name = "Auth", description = "Access token issuance."),
        (name = "Users", description = "Registration, role checks and role changes."),
        (name = "Classes", description = "Class proposals, review and instructor listings."),
        (name = "Bookings", description = "Seat reservations ahead of payment."),
        (name = "Payments", description = "Gateway intents and payment settlement."),
        (name = "Admin", description = "Dashboard totals."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
