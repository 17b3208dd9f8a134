use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::services::token_service::IdentityClaims;
use crate::state::AppState;
use crate::utils::ApiError;

/// Verified identity of the caller, extracted from `Authorization: Bearer <jwt>`.
///
/// Handlers that take this argument reject the request with 401 before
/// running when the header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct Authenticated(pub IdentityClaims);

impl Authenticated {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn claims(&self) -> &IdentityClaims {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            log::error!("❌ AppState missing from app data");
            return ready(Err(ApiError::Unauthorized));
        };

        let result = match bearer_token(req) {
            Some(token) => state.tokens.verify(token).map(Authenticated),
            None => Err(ApiError::Unauthorized),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bearer, memory_state};
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extracts_identity_from_valid_bearer() {
        let (state, _) = memory_state();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, bearer(&state, "sam@x.com")))
            .app_data(web::Data::new(state))
            .to_http_request();

        let identity = Authenticated::extract(&req).await.unwrap();
        assert_eq!(identity.email(), "sam@x.com");
    }

    #[actix_web::test]
    async fn missing_or_malformed_header_is_unauthorized() {
        let (state, _) = memory_state();
        let data = web::Data::new(state);

        let missing = TestRequest::default().app_data(data.clone()).to_http_request();
        assert!(matches!(Authenticated::extract(&missing).await, Err(ApiError::Unauthorized)));

        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .app_data(data.clone())
            .to_http_request();
        assert!(matches!(Authenticated::extract(&basic).await, Err(ApiError::Unauthorized)));

        let garbage = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .app_data(data)
            .to_http_request();
        assert!(matches!(Authenticated::extract(&garbage).await, Err(ApiError::Unauthorized)));
    }
}
