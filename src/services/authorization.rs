//! Route guards: one role-equality check plus the self-only identity binding.

use crate::models::{Role, User};
use crate::services::token_service::IdentityClaims;
use crate::store::UserStore;
use crate::utils::ApiError;

/// Succeeds iff the stored user for the token's email holds `role`.
/// A missing user is treated as a role mismatch.
pub async fn require_role(
    users: &dyn UserStore,
    identity: &IdentityClaims,
    role: Role,
) -> Result<User, ApiError> {
    match users.find_by_email(&identity.email).await? {
        Some(user) if user.role == Some(role) => Ok(user),
        _ => {
            log::warn!("🚫 {} lacks role {}", identity.email, role);
            Err(ApiError::Forbidden)
        }
    }
}

/// Binds a path or query email to the verified identity.
pub fn require_self(identity: &IdentityClaims, email: &str) -> Result<(), ApiError> {
    if identity.email == email {
        Ok(())
    } else {
        log::warn!("🚫 {} tried to act as {}", identity.email, email);
        Err(ApiError::Unauthorized)
    }
}

/// Role check used by `GET /users/{role}/{email}`.
pub async fn has_role(users: &dyn UserStore, email: &str, role: Role) -> Result<bool, ApiError> {
    Ok(users
        .find_by_email(email)
        .await?
        .map_or(false, |user| user.role == Some(role)))
}
