pub mod booking;
pub mod class;
pub mod instructor;
pub mod payment;
pub mod stats;
pub mod user;

pub use booking::*;
pub use class::*;
pub use instructor::*;
pub use payment::*;
pub use stats::*;
pub use user::*;

use serde::Serialize;

/// Id of a freshly inserted document.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub inserted_id: String,
}
