mod api;
mod config;
mod database;
mod gateway;
mod middleware;
mod models;
mod services;
mod state;
mod store;
mod utils;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::gateway::StripeGateway;
use crate::services::token_service::TokenService;
use crate::state::AppState;
use crate::store::Stores;

fn cors_layer(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::CONTENT_TYPE])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting Camp Booking Service...");
    log::info!("📊 Database: {} ({})", config.database_url, config.database_name);

    if config.access_token_secret.is_none() {
        log::warn!("⚠️  ACCESS_TOKEN_SECRET not set: tokens cannot be issued or verified");
    }
    if config.payment_secret_key.is_none() {
        log::warn!("⚠️  PAYMENT_SECRET_KEY not set: payment intents will fail");
    }

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    log::info!("✅ MongoDB connected successfully");

    let state = AppState {
        stores: Stores::mongo(db.clone()),
        tokens: Arc::new(TokenService::new(config.access_token_secret.as_deref())),
        gateway: Arc::new(StripeGateway::new(
            &config.payment_api_base,
            config.payment_secret_key.clone(),
        )),
        currency: config.payment_currency.clone(),
    };
    let state_data = web::Data::new(state);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", config.host, config.port);

    let allowed_origins = config.allowed_origins.clone();
    let openapi = api::swagger::ApiDoc::openapi();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(cors_layer(&allowed_origins))
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing database connections");
    db.shutdown().await;

    Ok(())
}
