use mongodb::bson::oid::ObjectId;

use super::error::ApiError;

/// Parses a 24-hex path/body id.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}
