use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Public instructor profile (armazenado em `instructors`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<InstructorProfile> for InstructorResponse {
    fn from(profile: InstructorProfile) -> Self {
        InstructorResponse {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: profile.user_id,
            name: profile.name,
            email: profile.email,
            image: profile.image,
        }
    }
}
