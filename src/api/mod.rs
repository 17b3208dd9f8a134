pub mod admin;
pub mod bookings;
pub mod classes;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod tokens;
pub mod users;

use actix_web::{error, web};
use serde::Deserialize;

use crate::utils::ApiError;

/// `?email=` filter shared by the self-only listings.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Registers every route. Malformed JSON, query or path input renders as a
/// 400 in the same `{ error, message }` shape as every other failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }))
    .route("/", web::get().to(health::banner))
    .route("/health", web::get().to(health::health_check))
    .route("/jwt", web::post().to(tokens::issue_token))
    // Users
    .service(
        web::resource("/users")
            .route(web::get().to(users::list_users))
            .route(web::post().to(users::register_user)),
    )
    .service(
        web::resource("/users/{role}/{key}")
            .route(web::get().to(users::check_role))
            .route(web::patch().to(users::change_role)),
    )
    .route("/users/{id}", web::delete().to(users::delete_user))
    // Classes
    .service(
        web::resource("/classes")
            .route(web::get().to(classes::list_classes))
            .route(web::post().to(classes::propose_class)),
    )
    .route("/classes/{id}", web::patch().to(classes::review_class))
    .route("/my-classes", web::get().to(classes::list_my_classes))
    .route("/my-classes/{id}", web::put().to(classes::update_my_class))
    .route("/instructors", web::get().to(classes::list_instructors))
    // Bookings
    .service(
        web::resource("/bookings")
            .route(web::get().to(bookings::list_bookings))
            .route(web::post().to(bookings::create_booking)),
    )
    .route("/bookings/{id}", web::delete().to(bookings::cancel_booking))
    // Payments
    .route(
        "/create-payment-intent",
        web::post().to(payments::create_payment_intent),
    )
    .service(
        web::resource("/payments")
            .route(web::get().to(payments::list_payments))
            .route(web::post().to(payments::settle_payment)),
    )
    .route("/admin-stats", web::get().to(admin::admin_stats));
}
