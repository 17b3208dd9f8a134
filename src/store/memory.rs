//! In-memory stores for tests. Every operation runs under one lock, which
//! matches the per-document atomicity MongoDB gives the real adapter.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{
    BookingStore, ClassStore, DeleteOutcome, InstructorStore, PaymentStore, StoreError,
    StoreResult, UpdateOutcome, UserStore,
};
use crate::models::{
    Booking, ClassDetails, ClassOffering, ClassStatus, InstructorProfile, Payment, Role, User,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    classes: Vec<ClassOffering>,
    instructors: Vec<InstructorProfile>,
    bookings: Vec<Booking>,
    payments: Vec<Payment>,
}

/// Gives other tasks a turn before touching the data, so `tokio::join!`
/// interleaves concurrent operations the way a real store would.
async fn interleave() {
    tokio::task::yield_now().await;
}

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    fail_payment_inserts: AtomicBool,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections.lock().expect("memory store poisoned")
    }

    /// Makes every following payment insert fail with a database error.
    pub fn fail_payment_inserts(&self, fail: bool) {
        self.fail_payment_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn seed_user(&self, name: &str, email: &str, role: Option<Role>) -> ObjectId {
        let id = ObjectId::new();
        self.lock().users.push(User {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            photo: None,
            role,
        });
        id
    }

    pub fn seed_class(&self, mut class: ClassOffering) -> ObjectId {
        let id = ObjectId::new();
        class.id = Some(id);
        self.lock().classes.push(class);
        id
    }

    pub fn seed_booking(&self, email: &str, class_id: &ObjectId, price: f64) -> ObjectId {
        let id = ObjectId::new();
        self.lock().bookings.push(Booking {
            id: Some(id),
            email: email.to_string(),
            class_id: class_id.to_hex(),
            class_name: "Seeded".to_string(),
            class_image: None,
            instructor: String::new(),
            price,
        });
        id
    }

    pub fn seed_payment(&self, email: &str, price: f64) {
        self.lock().payments.push(Payment {
            id: Some(ObjectId::new()),
            email: email.to_string(),
            class_id: ObjectId::new().to_hex(),
            booking_id: ObjectId::new().to_hex(),
            class_name: None,
            price,
            transaction_id: None,
            payment_method: None,
            paid_at: 0,
        });
    }

    pub fn class(&self, id: &ObjectId) -> Option<ClassOffering> {
        self.lock().classes.iter().find(|c| c.id == Some(*id)).cloned()
    }

    pub fn user(&self, id: &ObjectId) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == Some(*id)).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.lock().bookings.clone()
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.lock().payments.clone()
    }

    pub fn instructors(&self) -> Vec<InstructorProfile> {
        self.lock().instructors.clone()
    }
}

pub fn sample_class(instructor: &str, email: &str, seats: i64, students: i64) -> ClassOffering {
    ClassOffering {
        id: None,
        class_name: "Archery".to_string(),
        class_image: None,
        instructor: instructor.to_string(),
        email: email.to_string(),
        price: 25.0,
        available_seats: seats,
        total_students: students,
        status: ClassStatus::Approved,
        feedback: None,
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.lock().users.clone())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn insert(&self, user: &User) -> StoreResult<ObjectId> {
        let mut collections = self.lock();
        if collections.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }
        let id = user.id.unwrap_or_else(ObjectId::new);
        let mut stored = user.clone();
        stored.id = Some(id);
        collections.users.push(stored);
        Ok(id)
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateOutcome> {
        let mut collections = self.lock();
        let Some(user) = collections.users.iter_mut().find(|u| u.id == Some(*id)) else {
            return Ok(UpdateOutcome::default());
        };
        let modified = user.role != Some(role);
        user.role = Some(role);
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let mut collections = self.lock();
        let before = collections.users.len();
        collections.users.retain(|u| u.id != Some(*id));
        Ok(DeleteOutcome {
            deleted_count: (before - collections.users.len()) as u64,
        })
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.lock().users.len() as u64)
    }
}

#[async_trait]
impl ClassStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<ClassOffering>> {
        Ok(self.lock().classes.clone())
    }

    async fn list_by_owner(&self, email: &str) -> StoreResult<Vec<ClassOffering>> {
        Ok(self
            .lock()
            .classes
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>> {
        interleave().await;
        Ok(self.class(id))
    }

    async fn insert(&self, class: &ClassOffering) -> StoreResult<ObjectId> {
        Ok(self.seed_class(class.clone()))
    }

    async fn review(&self, id: &ObjectId, fields: Document) -> StoreResult<UpdateOutcome> {
        let mut collections = self.lock();
        let Some(class) = collections.classes.iter_mut().find(|c| c.id == Some(*id)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        if let Some(Bson::String(feedback)) = fields.get("feedback") {
            modified |= class.feedback.as_deref() != Some(feedback.as_str());
            class.feedback = Some(feedback.clone());
        }
        if let Some(Bson::String(status)) = fields.get("status") {
            let status = match status.as_str() {
                "Approved" => ClassStatus::Approved,
                "Denied" => ClassStatus::Denied,
                _ => ClassStatus::Pending,
            };
            modified |= class.status != status;
            class.status = status;
        }
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn replace_details(
        &self,
        id: &ObjectId,
        owner_email: &str,
        details: &ClassDetails,
    ) -> StoreResult<Option<ClassOffering>> {
        interleave().await;
        let mut collections = self.lock();
        let class = collections
            .classes
            .iter_mut()
            .find(|c| c.id == Some(*id) && c.email == owner_email);
        Ok(class.map(|class| {
            details.apply_to(class);
            class.clone()
        }))
    }

    async fn count_approved_by_instructor(&self, instructor: &str) -> StoreResult<u64> {
        Ok(self
            .lock()
            .classes
            .iter()
            .filter(|c| c.instructor == instructor && c.status == ClassStatus::Approved)
            .count() as u64)
    }

    async fn take_seat(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>> {
        interleave().await;
        let mut collections = self.lock();
        let class = collections
            .classes
            .iter_mut()
            .find(|c| c.id == Some(*id) && c.available_seats > 0);
        Ok(class.map(|class| {
            let before = class.clone();
            class.available_seats -= 1;
            class.total_students += 1;
            before
        }))
    }

    async fn release_seat(&self, id: &ObjectId) -> StoreResult<()> {
        interleave().await;
        let mut collections = self.lock();
        if let Some(class) = collections.classes.iter_mut().find(|c| c.id == Some(*id)) {
            class.available_seats += 1;
            class.total_students -= 1;
        }
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.lock().classes.len() as u64)
    }
}

#[async_trait]
impl InstructorStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<InstructorProfile>> {
        Ok(self.lock().instructors.clone())
    }

    async fn insert(&self, profile: &InstructorProfile) -> StoreResult<ObjectId> {
        let mut collections = self.lock();
        if collections.instructors.iter().any(|p| p.user_id == profile.user_id) {
            return Err(StoreError::Duplicate(format!("userId {}", profile.user_id)));
        }
        let id = ObjectId::new();
        let mut stored = profile.clone();
        stored.id = Some(id);
        collections.instructors.push(stored);
        Ok(id)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, booking: &Booking) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        let mut stored = booking.clone();
        stored.id = Some(id);
        self.lock().bookings.push(stored);
        Ok(id)
    }

    async fn delete(&self, id: &ObjectId, email: &str) -> StoreResult<DeleteOutcome> {
        Ok(DeleteOutcome {
            deleted_count: u64::from(self.take(id, email).await?.is_some()),
        })
    }

    async fn take(&self, id: &ObjectId, email: &str) -> StoreResult<Option<Booking>> {
        interleave().await;
        let mut collections = self.lock();
        let position = collections
            .bookings
            .iter()
            .position(|b| b.id == Some(*id) && b.email == email);
        Ok(position.map(|index| collections.bookings.remove(index)))
    }

    async fn restore(&self, booking: &Booking) -> StoreResult<()> {
        interleave().await;
        self.lock().bookings.push(booking.clone());
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Payment>> {
        Ok(self
            .lock()
            .payments
            .iter()
            .filter(|p| p.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, payment: &Payment) -> StoreResult<ObjectId> {
        interleave().await;
        if self.fail_payment_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Database("payments collection unavailable".into()));
        }
        let id = ObjectId::new();
        let mut stored = payment.clone();
        stored.id = Some(id);
        self.lock().payments.push(stored);
        Ok(id)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.lock().payments.len() as u64)
    }

    async fn total_revenue(&self) -> StoreResult<f64> {
        Ok(self.lock().payments.iter().map(|p| p.price).sum())
    }
}
