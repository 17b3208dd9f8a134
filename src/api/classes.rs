use actix_web::{web, HttpResponse};

use super::EmailQuery;
use crate::middleware::Authenticated;
use crate::models::{
    ClassDetails, ClassResponse, InsertedResponse, InstructorResponse, NewClassRequest,
    ReviewClassRequest, Role,
};
use crate::services::{authorization, class_service};
use crate::state::AppState;
use crate::store::UpdateOutcome;
use crate::utils::ApiError;

#[utoipa::path(
    get,
    path = "/classes",
    tag = "Classes",
    responses((status = 200, description = "Every class, any status", body = [ClassResponse]))
)]
pub async fn list_classes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let classes = class_service::list_classes(&state.stores).await?;
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    post,
    path = "/classes",
    tag = "Classes",
    security(("bearer_auth" = [])),
    request_body = NewClassRequest,
    responses(
        (status = 200, description = "Class stored as pending", body = InsertedResponse),
        (status = 403, description = "Caller is not an instructor")
    )
)]
pub async fn propose_class(
    state: web::Data<AppState>,
    auth: Authenticated,
    body: web::Json<NewClassRequest>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Instructor).await?;
    log::info!("📚 POST /classes - '{}' by {}", body.class_name, auth.email());

    let inserted = class_service::propose_class(&state.stores, auth.claims(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(inserted))
}

#[utoipa::path(
    patch,
    path = "/classes/{id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Class id")),
    request_body = ReviewClassRequest,
    responses(
        (status = 200, description = "Feedback and/or status applied", body = UpdateOutcome),
        (status = 400, description = "Neither feedback nor status supplied"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such class")
    )
)]
pub async fn review_class(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<String>,
    body: web::Json<ReviewClassRequest>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Admin).await?;
    log::info!("🧐 PATCH /classes/{} - by {}", path, auth.email());

    let outcome = class_service::review_class(&state.stores, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/my-classes",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "Classes owned by the caller", body = [ClassResponse]),
        (status = 401, description = "Missing token or email mismatch")
    )
)]
pub async fn list_my_classes(
    state: web::Data<AppState>,
    auth: Authenticated,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let classes =
        class_service::list_owned_classes(&state.stores, auth.claims(), query.email.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    put,
    path = "/my-classes/{id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Class id")),
    request_body = ClassDetails,
    responses(
        (status = 200, description = "Updated class", body = ClassResponse),
        (status = 403, description = "Caller is not an instructor"),
        (status = 404, description = "No class with this id owned by the caller")
    )
)]
pub async fn update_my_class(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<String>,
    body: web::Json<ClassDetails>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Instructor).await?;
    log::info!("✏️ PUT /my-classes/{} - by {}", path, auth.email());

    let class =
        class_service::update_own_class(&state.stores, auth.claims(), &path, body.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(class))
}

#[utoipa::path(
    get,
    path = "/instructors",
    tag = "Classes",
    responses((status = 200, description = "Public instructor profiles", body = [InstructorResponse]))
)]
pub async fn list_instructors(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let instructors = class_service::list_instructors(&state.stores).await?;
    Ok(HttpResponse::Ok().json(instructors))
}

#[cfg(test)]
mod tests {
    use crate::models::{ClassStatus, Role};
    use crate::store::memory::sample_class;
    use crate::test_support::{bearer, memory_state};
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn instructor_proposes_and_admin_approves() {
        let (state, store) = memory_state();
        store.seed_user("Rita", "rita@x.com", Some(Role::Instructor));
        store.seed_user("Ada", "ada@x.com", Some(Role::Admin));
        let instructor = bearer(&state, "rita@x.com");
        let admin = bearer(&state, "ada@x.com");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let proposal = serde_json::json!({
            "className": "Pottery",
            "instructor": "Rita",
            "price": 30.0,
            "availableSeats": 8,
            "status": "Approved"
        });
        let req = test::TestRequest::post()
            .uri("/classes")
            .insert_header(("Authorization", admin.clone()))
            .set_json(&proposal)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);

        let req = test::TestRequest::post()
            .uri("/classes")
            .insert_header(("Authorization", instructor))
            .set_json(&proposal)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = body["insertedId"].as_str().unwrap().to_string();
        let class_id = crate::utils::parse_object_id(&id).unwrap();
        assert_eq!(store.class(&class_id).unwrap().status, ClassStatus::Pending);

        let req = test::TestRequest::patch()
            .uri(&format!("/classes/{}", id))
            .insert_header(("Authorization", admin))
            .set_json(serde_json::json!({ "status": "Approved", "feedback": "Looks great" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["modifiedCount"], 1);
        assert_eq!(store.class(&class_id).unwrap().status, ClassStatus::Approved);
    }

    #[actix_web::test]
    async fn my_classes_is_bound_to_the_token_email() {
        let (state, store) = memory_state();
        store.seed_class(sample_class("Rita", "rita@x.com", 5, 0));
        let token = bearer(&state, "rita@x.com");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/my-classes?email=rita@x.com")
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/my-classes?email=omar@x.com")
            .insert_header(("Authorization", token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::get().uri("/classes").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn instructors_are_public() {
        let (state, store) = memory_state();
        let profile = crate::models::InstructorProfile {
            id: None,
            user_id: mongodb::bson::oid::ObjectId::new().to_hex(),
            name: "Rita".to_string(),
            email: "rita@x.com".to_string(),
            image: None,
        };
        crate::store::InstructorStore::insert(&*store, &profile).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/instructors").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["name"], "Rita");
        assert_eq!(body[0]["userId"], profile.user_id);
    }
}
