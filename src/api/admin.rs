use actix_web::{web, HttpResponse};

use crate::middleware::Authenticated;
use crate::models::{AdminStats, Role};
use crate::services::{authorization, stats_service};
use crate::state::AppState;
use crate::utils::ApiError;

#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals across users, classes and payments", body = AdminStats),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn admin_stats(
    state: web::Data<AppState>,
    auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Admin).await?;
    log::info!("📊 GET /admin-stats - by {}", auth.email());

    let stats = stats_service::admin_stats(&state.stores).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use crate::models::Role;
    use crate::store::memory::sample_class;
    use crate::test_support::{bearer, memory_state};
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn admin_sees_totals() {
        let (state, store) = memory_state();
        store.seed_user("Ada", "ada@x.com", Some(Role::Admin));
        store.seed_user("Sam", "sam@x.com", Some(Role::Student));
        store.seed_class(sample_class("Rita", "rita@x.com", 5, 0));
        store.seed_payment("sam@x.com", 40.0);
        store.seed_payment("sam@x.com", 12.5);
        let admin = bearer(&state, "ada@x.com");
        let student = bearer(&state, "sam@x.com");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin-stats")
            .insert_header(("Authorization", admin))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            serde_json::json!({ "users": 2, "classes": 1, "purchases": 2, "revenue": 52.5 })
        );

        let req = test::TestRequest::get()
            .uri("/admin-stats")
            .insert_header(("Authorization", student))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }
}
