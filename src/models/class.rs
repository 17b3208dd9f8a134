use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum ClassStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "Pending",
            ClassStatus::Approved => "Approved",
            ClassStatus::Denied => "Denied",
        }
    }
}

/// Class offered by an instructor (armazenada em `classes`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOffering {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_image: Option<String>,

    /// Display name of the owning instructor
    pub instructor: String,

    /// Email of the owning instructor
    pub email: String,

    pub price: f64,

    /// Seats still purchasable. Settlement takes one per purchase and the
    /// owner may reset it through `PUT /my-classes/{id}`, so the sum with
    /// `total_students` only holds between owner edits.
    pub available_seats: i64,

    #[serde(default)]
    pub total_students: i64,

    #[serde(default)]
    pub status: ClassStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewClassRequest {
    pub class_name: String,
    pub class_image: Option<String>,
    pub instructor: String,
    pub price: f64,
    pub available_seats: i64,
    #[serde(default)]
    pub total_students: i64,
}

/// Admin review: each field is applied only when present.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ReviewClassRequest {
    pub feedback: Option<String>,
    pub status: Option<ClassStatus>,
}

impl ReviewClassRequest {
    /// `$set` body for the supplied fields, or `None` when nothing was supplied.
    pub fn to_set_document(&self) -> Option<Document> {
        let mut fields = Document::new();
        if let Some(feedback) = self.feedback.as_deref().filter(|f| !f.is_empty()) {
            fields.insert("feedback", feedback);
        }
        if let Some(status) = self.status {
            fields.insert("status", status.as_str());
        }
        if fields.is_empty() {
            None
        } else {
            Some(fields)
        }
    }
}

/// Instructor-owned fields replaced by `PUT /my-classes/{id}`.
///
/// Status, feedback and enrollment are owned by review and settlement.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetails {
    pub class_name: String,
    pub class_image: Option<String>,
    pub instructor: String,
    pub price: f64,
    pub available_seats: i64,
}

impl ClassDetails {
    pub fn to_set_document(&self) -> Document {
        doc! {
            "className": self.class_name.as_str(),
            "classImage": self.class_image.clone(),
            "instructor": self.instructor.as_str(),
            "price": self.price,
            "availableSeats": self.available_seats,
        }
    }

    pub fn apply_to(&self, class: &mut ClassOffering) {
        class.class_name = self.class_name.clone();
        class.class_image = self.class_image.clone();
        class.instructor = self.instructor.clone();
        class.price = self.price;
        class.available_seats = self.available_seats;
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub id: String,
    pub class_name: String,
    pub class_image: Option<String>,
    pub instructor: String,
    pub email: String,
    pub price: f64,
    pub available_seats: i64,
    pub total_students: i64,
    pub status: ClassStatus,
    pub feedback: Option<String>,
}

impl From<ClassOffering> for ClassResponse {
    fn from(class: ClassOffering) -> Self {
        ClassResponse {
            id: class.id.map(|id| id.to_hex()).unwrap_or_default(),
            class_name: class.class_name,
            class_image: class.class_image,
            instructor: class.instructor,
            email: class.email,
            price: class.price,
            available_seats: class.available_seats,
            total_students: class.total_students,
            status: class.status,
            feedback: class.feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_only_sets_supplied_fields() {
        let review = ReviewClassRequest {
            feedback: None,
            status: Some(ClassStatus::Approved),
        };
        let set = review.to_set_document().unwrap();
        assert_eq!(set.get_str("status").unwrap(), "Approved");
        assert!(!set.contains_key("feedback"));

        let empty_feedback = ReviewClassRequest {
            feedback: Some(String::new()),
            status: None,
        };
        assert!(empty_feedback.to_set_document().is_none());
    }

    #[test]
    fn status_uses_stored_spelling() {
        let json = serde_json::to_string(&ClassStatus::Denied).unwrap();
        assert_eq!(json, "\"Denied\"");
    }
}
