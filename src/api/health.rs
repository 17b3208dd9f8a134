use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::state::AppState;

pub const BANNER: &str = "Camp Craftopia is Running";

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: bool,
    pub timestamp: i64,
}

pub async fn banner() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(BANNER)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database did not answer", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match state.stores.users.count().await {
        Ok(_) => true,
        Err(e) => {
            log::error!("❌ Health probe failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_state;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn banner_and_health_answer() {
        let (state, _) = memory_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(res.status().is_success());
        assert_eq!(test::read_body(res).await, BANNER);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
    }
}
