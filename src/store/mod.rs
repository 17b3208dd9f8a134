//! Store ports. Each collection is reached through one trait so services can
//! be exercised against MongoDB or the in-memory double alike.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::database::MongoDB;
use crate::models::{Booking, ClassDetails, ClassOffering, InstructorProfile, Payment, Role, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(String),

    #[error("duplicate key: {0}")]
    Duplicate(String),
}

const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                StoreError::Duplicate(write_error.message.clone())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Raw counters of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<User>>;
    async fn insert(&self, user: &User) -> StoreResult<ObjectId>;
    async fn set_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateOutcome>;
    async fn delete(&self, id: &ObjectId) -> StoreResult<DeleteOutcome>;
    async fn count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait ClassStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<ClassOffering>>;
    async fn list_by_owner(&self, email: &str) -> StoreResult<Vec<ClassOffering>>;
    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>>;
    async fn insert(&self, class: &ClassOffering) -> StoreResult<ObjectId>;

    /// Applies a partial `$set` (feedback and/or status).
    async fn review(&self, id: &ObjectId, fields: Document) -> StoreResult<UpdateOutcome>;

    /// Replaces the instructor-owned fields of a class owned by `owner_email`
    /// and returns the updated document.
    async fn replace_details(
        &self,
        id: &ObjectId,
        owner_email: &str,
        details: &ClassDetails,
    ) -> StoreResult<Option<ClassOffering>>;

    async fn count_approved_by_instructor(&self, instructor: &str) -> StoreResult<u64>;

    /// Takes one seat if `availableSeats > 0`, as a single atomic update.
    /// Returns the document as it was before the decrement.
    async fn take_seat(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>>;

    /// Gives back a seat taken by `take_seat`.
    async fn release_seat(&self, id: &ObjectId) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait InstructorStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<InstructorProfile>>;
    async fn insert(&self, profile: &InstructorProfile) -> StoreResult<ObjectId>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Booking>>;
    async fn insert(&self, booking: &Booking) -> StoreResult<ObjectId>;
    async fn delete(&self, id: &ObjectId, email: &str) -> StoreResult<DeleteOutcome>;

    /// Removes and returns the booking; at most one caller ever receives it.
    async fn take(&self, id: &ObjectId, email: &str) -> StoreResult<Option<Booking>>;

    /// Puts a booking removed by `take` back under its original id.
    async fn restore(&self, booking: &Booking) -> StoreResult<()>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Payment>>;
    async fn insert(&self, payment: &Payment) -> StoreResult<ObjectId>;
    async fn count(&self) -> StoreResult<u64>;
    async fn total_revenue(&self) -> StoreResult<f64>;
}

/// Store handles shared by every request.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub classes: Arc<dyn ClassStore>,
    pub instructors: Arc<dyn InstructorStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub payments: Arc<dyn PaymentStore>,
}

impl Stores {
    pub fn mongo(db: MongoDB) -> Self {
        let db = Arc::new(db);
        Stores {
            users: db.clone(),
            classes: db.clone(),
            instructors: db.clone(),
            bookings: db.clone(),
            payments: db,
        }
    }

    #[cfg(test)]
    pub fn memory(store: Arc<memory::MemoryStore>) -> Self {
        Stores {
            users: store.clone(),
            classes: store.clone(),
            instructors: store.clone(),
            bookings: store.clone(),
            payments: store,
        }
    }
}
