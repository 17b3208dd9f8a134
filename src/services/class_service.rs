use crate::models::{
    ClassDetails, ClassOffering, ClassResponse, ClassStatus, InsertedResponse,
    InstructorResponse, NewClassRequest, ReviewClassRequest,
};
use crate::services::authorization::require_self;
use crate::services::token_service::IdentityClaims;
use crate::store::{Stores, UpdateOutcome};
use crate::utils::{parse_object_id, ApiError};

pub async fn list_classes(stores: &Stores) -> Result<Vec<ClassResponse>, ApiError> {
    let classes = stores.classes.list().await?;
    Ok(classes.into_iter().map(ClassResponse::from).collect())
}

/// Classes owned by `email`, which must be the caller. No email, no classes.
pub async fn list_owned_classes(
    stores: &Stores,
    identity: &IdentityClaims,
    email: Option<&str>,
) -> Result<Vec<ClassResponse>, ApiError> {
    let Some(email) = email else {
        return Ok(Vec::new());
    };
    require_self(identity, email)?;

    let classes = stores.classes.list_by_owner(email).await?;
    Ok(classes.into_iter().map(ClassResponse::from).collect())
}

/// New classes always start `Pending` and belong to the caller.
/// Seat and enrollment counts are taken as supplied.
pub async fn propose_class(
    stores: &Stores,
    identity: &IdentityClaims,
    request: NewClassRequest,
) -> Result<InsertedResponse, ApiError> {
    let class = ClassOffering {
        id: None,
        class_name: request.class_name,
        class_image: request.class_image,
        instructor: request.instructor,
        email: identity.email.clone(),
        price: request.price,
        available_seats: request.available_seats,
        total_students: request.total_students,
        status: ClassStatus::Pending,
        feedback: None,
    };

    let id = stores.classes.insert(&class).await?;
    log::info!("📚 Class '{}' proposed by {}", class.class_name, class.email);
    Ok(InsertedResponse {
        inserted_id: id.to_hex(),
    })
}

pub async fn review_class(
    stores: &Stores,
    class_id: &str,
    request: ReviewClassRequest,
) -> Result<UpdateOutcome, ApiError> {
    let id = parse_object_id(class_id)?;
    let fields = request
        .to_set_document()
        .ok_or_else(|| ApiError::BadRequest("feedback or status is required".to_string()))?;

    let outcome = stores.classes.review(&id, fields).await?;
    if outcome.matched_count == 0 {
        return Err(ApiError::not_found("Class"));
    }
    Ok(outcome)
}

pub async fn update_own_class(
    stores: &Stores,
    identity: &IdentityClaims,
    class_id: &str,
    details: ClassDetails,
) -> Result<ClassResponse, ApiError> {
    let id = parse_object_id(class_id)?;
    stores
        .classes
        .replace_details(&id, &identity.email, &details)
        .await?
        .map(ClassResponse::from)
        .ok_or_else(|| ApiError::not_found("Class"))
}

pub async fn list_instructors(stores: &Stores) -> Result<Vec<InstructorResponse>, ApiError> {
    let profiles = stores.instructors.list().await?;
    Ok(profiles.into_iter().map(InstructorResponse::from).collect())
}
