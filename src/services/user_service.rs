use crate::models::{
    InstructorProfile, RegisterResponse, RegisterUserRequest, RoleChangeResponse, Role, User,
    UserResponse,
};
use crate::store::{DeleteOutcome, StoreError, Stores};
use crate::utils::{parse_object_id, ApiError};

pub const USER_EXISTS_MESSAGE: &str = "User Already Exists";
pub const NO_APPROVED_CLASSES_MESSAGE: &str = "No approved classes found for this instructor.";
pub const ROLE_UNCHANGED_MESSAGE: &str = "Failed to update user role.";

/// Registers a user once per email. A repeated email returns the stored
/// record instead of inserting again.
pub async fn register(
    stores: &Stores,
    request: RegisterUserRequest,
) -> Result<RegisterResponse, ApiError> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(ApiError::BadRequest("email is required".to_string()));
    }

    if let Some(existing) = stores.users.find_by_email(email).await? {
        return Ok(existing_user(existing));
    }

    let user = User {
        id: None,
        name: request.name,
        email: email.to_string(),
        photo: request.photo,
        role: None,
    };

    match stores.users.insert(&user).await {
        Ok(id) => {
            log::info!("✅ User registered: {}", user.email);
            Ok(RegisterResponse {
                inserted_id: Some(id.to_hex()),
                message: None,
                user: None,
            })
        }
        // Lost a race against a concurrent registration of the same email.
        Err(StoreError::Duplicate(_)) => match stores.users.find_by_email(email).await? {
            Some(existing) => Ok(existing_user(existing)),
            None => Err(ApiError::Store(StoreError::Database(format!(
                "user {} vanished after duplicate insert",
                email
            )))),
        },
        Err(e) => Err(e.into()),
    }
}

fn existing_user(user: User) -> RegisterResponse {
    RegisterResponse {
        inserted_id: None,
        message: Some(USER_EXISTS_MESSAGE.to_string()),
        user: Some(UserResponse::from(user)),
    }
}

pub async fn list_users(stores: &Stores) -> Result<Vec<UserResponse>, ApiError> {
    let users = stores.users.list().await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

/// Sets the user's role. Promotion to instructor additionally creates the
/// public instructor profile when the user already has an approved class.
///
/// The approved-class lookup is not transactional with the role update: a
/// class approved after promotion never produces a profile.
pub async fn change_role(
    stores: &Stores,
    user_id: &str,
    role: Role,
) -> Result<RoleChangeResponse, ApiError> {
    let id = parse_object_id(user_id)?;
    let outcome = stores.users.set_role(&id, role).await?;
    log::info!(
        "🔧 Role {} for user {}: matched={} modified={}",
        role,
        user_id,
        outcome.matched_count,
        outcome.modified_count
    );

    let mut response = RoleChangeResponse {
        matched_count: outcome.matched_count,
        modified_count: outcome.modified_count,
        inserted_id: None,
        message: None,
    };

    if role != Role::Instructor {
        return Ok(response);
    }

    if outcome.modified_count != 1 {
        response.message = Some(ROLE_UNCHANGED_MESSAGE.to_string());
        return Ok(response);
    }

    let user = stores
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    if stores.classes.count_approved_by_instructor(&user.name).await? == 0 {
        response.message = Some(NO_APPROVED_CLASSES_MESSAGE.to_string());
        return Ok(response);
    }

    let profile = InstructorProfile {
        id: None,
        user_id: id.to_hex(),
        name: user.name,
        email: user.email,
        image: user.photo,
    };
    let inserted = stores.instructors.insert(&profile).await?;
    log::info!("🎓 Instructor profile created for {}", profile.email);
    response.inserted_id = Some(inserted.to_hex());

    Ok(response)
}

pub async fn delete_user(stores: &Stores, user_id: &str) -> Result<DeleteOutcome, ApiError> {
    let id = parse_object_id(user_id)?;
    let outcome = stores.users.delete(&id).await?;
    if outcome.deleted_count == 0 {
        return Err(ApiError::not_found("User"));
    }
    log::info!("🗑️ User {} deleted", user_id);
    Ok(outcome)
}
