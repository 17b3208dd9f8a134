use actix_web::{web, HttpResponse};

use crate::services::token_service::{IdentityRequest, TokenResponse};
use crate::state::AppState;
use crate::utils::ApiError;

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Signed access token, valid for one hour", body = TokenResponse),
        (status = 400, description = "Email missing"),
        (status = 500, description = "Signing key not configured")
    )
)]
pub async fn issue_token(
    state: web::Data<AppState>,
    body: web::Json<IdentityRequest>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🔑 POST /jwt - {}", body.email);
    let token = state.tokens.issue(&body)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
