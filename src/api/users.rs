use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::middleware::Authenticated;
use crate::models::{RegisterResponse, RegisterUserRequest, Role, RoleChangeResponse, UserResponse};
use crate::services::{authorization, user_service};
use crate::state::AppState;
use crate::store::DeleteOutcome;
use crate::utils::ApiError;

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    raw.parse::<Role>().map_err(ApiError::BadRequest)
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    state: web::Data<AppState>,
    auth: Authenticated,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Admin).await?;
    log::info!("👥 GET /users - by {}", auth.email());

    let users = user_service::list_users(&state.stores).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Inserted id, or the existing user for a known email", body = RegisterResponse),
        (status = 400, description = "Email missing")
    )
)]
pub async fn register_user(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📝 POST /users - {}", body.email);
    let response = user_service::register(&state.stores, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Answers `{ "<role>": bool }` for the caller's own email.
#[utoipa::path(
    get,
    path = "/users/{role}/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("role" = String, Path, description = "student, instructor or admin"),
        ("email" = String, Path, description = "Must equal the token email")
    ),
    responses(
        (status = 200, description = "Whether the user holds the role"),
        (status = 401, description = "Missing token or email mismatch")
    )
)]
pub async fn check_role(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (role, email) = path.into_inner();
    let role = parse_role(&role)?;
    authorization::require_self(auth.claims(), &email)?;

    let allowed = authorization::has_role(&*state.stores.users, &email, role).await?;
    let mut body = Map::new();
    body.insert(role.to_string(), Value::Bool(allowed));
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    patch,
    path = "/users/{role}/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("role" = String, Path, description = "Target role"),
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Update counts, plus the instructor profile outcome on promotion", body = RoleChangeResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn change_role(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (role, user_id) = path.into_inner();
    let role = parse_role(&role)?;
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Admin).await?;
    log::info!("🔧 PATCH /users/{}/{} - by {}", role, user_id, auth.email());

    let response = user_service::change_role(&state.stores, &user_id, role).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = DeleteOutcome),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    authorization::require_role(&*state.stores.users, auth.claims(), Role::Admin).await?;
    log::info!("🗑️ DELETE /users/{} - by {}", path, auth.email());

    let outcome = user_service::delete_user(&state.stores, &path).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
