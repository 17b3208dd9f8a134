use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;

use super::{
    BookingStore, ClassStore, DeleteOutcome, InstructorStore, PaymentStore, StoreError,
    StoreResult, UpdateOutcome, UserStore,
};
use crate::database::{MongoDB, BOOKINGS, CLASSES, INSTRUCTORS, PAYMENTS, USERS};
use crate::models::{
    Booking, ClassDetails, ClassOffering, ClassStatus, InstructorProfile, Payment, Role, User,
};

fn inserted_object_id(id: Bson) -> StoreResult<ObjectId> {
    id.as_object_id()
        .ok_or_else(|| StoreError::Database(format!("unexpected inserted id: {}", id)))
}

#[async_trait]
impl UserStore for MongoDB {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let cursor = self.collection::<User>(USERS).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<User>> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": *id }).await?)
    }

    async fn insert(&self, user: &User) -> StoreResult<ObjectId> {
        let result = self.collection::<User>(USERS).insert_one(user).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection::<User>(USERS)
            .update_one(doc! { "_id": *id }, doc! { "$set": { "role": role.as_str() } })
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let result = self.collection::<User>(USERS).delete_one(doc! { "_id": *id }).await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.collection::<User>(USERS).estimated_document_count().await?)
    }
}

#[async_trait]
impl ClassStore for MongoDB {
    async fn list(&self) -> StoreResult<Vec<ClassOffering>> {
        let cursor = self.collection::<ClassOffering>(CLASSES).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_by_owner(&self, email: &str) -> StoreResult<Vec<ClassOffering>> {
        let cursor = self
            .collection::<ClassOffering>(CLASSES)
            .find(doc! { "email": email })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>> {
        Ok(self
            .collection::<ClassOffering>(CLASSES)
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn insert(&self, class: &ClassOffering) -> StoreResult<ObjectId> {
        let result = self.collection::<ClassOffering>(CLASSES).insert_one(class).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn review(&self, id: &ObjectId, fields: Document) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection::<ClassOffering>(CLASSES)
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn replace_details(
        &self,
        id: &ObjectId,
        owner_email: &str,
        details: &ClassDetails,
    ) -> StoreResult<Option<ClassOffering>> {
        Ok(self
            .collection::<ClassOffering>(CLASSES)
            .find_one_and_update(
                doc! { "_id": *id, "email": owner_email },
                doc! { "$set": details.to_set_document() },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn count_approved_by_instructor(&self, instructor: &str) -> StoreResult<u64> {
        Ok(self
            .collection::<ClassOffering>(CLASSES)
            .count_documents(doc! {
                "instructor": instructor,
                "status": ClassStatus::Approved.as_str(),
            })
            .await?)
    }

    async fn take_seat(&self, id: &ObjectId) -> StoreResult<Option<ClassOffering>> {
        // Filter and decrement run as one document update, so two settlements
        // can never both observe the last seat.
        Ok(self
            .collection::<ClassOffering>(CLASSES)
            .find_one_and_update(
                doc! { "_id": *id, "availableSeats": { "$gt": 0 } },
                doc! { "$inc": { "availableSeats": -1, "totalStudents": 1 } },
            )
            .return_document(ReturnDocument::Before)
            .await?)
    }

    async fn release_seat(&self, id: &ObjectId) -> StoreResult<()> {
        self.collection::<ClassOffering>(CLASSES)
            .update_one(
                doc! { "_id": *id },
                doc! { "$inc": { "availableSeats": 1, "totalStudents": -1 } },
            )
            .await?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self
            .collection::<ClassOffering>(CLASSES)
            .estimated_document_count()
            .await?)
    }
}

#[async_trait]
impl InstructorStore for MongoDB {
    async fn list(&self) -> StoreResult<Vec<InstructorProfile>> {
        let cursor = self
            .collection::<InstructorProfile>(INSTRUCTORS)
            .find(doc! {})
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, profile: &InstructorProfile) -> StoreResult<ObjectId> {
        let result = self
            .collection::<InstructorProfile>(INSTRUCTORS)
            .insert_one(profile)
            .await?;
        inserted_object_id(result.inserted_id)
    }
}

#[async_trait]
impl BookingStore for MongoDB {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Booking>> {
        let cursor = self
            .collection::<Booking>(BOOKINGS)
            .find(doc! { "email": email })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, booking: &Booking) -> StoreResult<ObjectId> {
        let result = self.collection::<Booking>(BOOKINGS).insert_one(booking).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn delete(&self, id: &ObjectId, email: &str) -> StoreResult<DeleteOutcome> {
        let result = self
            .collection::<Booking>(BOOKINGS)
            .delete_one(doc! { "_id": *id, "email": email })
            .await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn take(&self, id: &ObjectId, email: &str) -> StoreResult<Option<Booking>> {
        Ok(self
            .collection::<Booking>(BOOKINGS)
            .find_one_and_delete(doc! { "_id": *id, "email": email })
            .await?)
    }

    async fn restore(&self, booking: &Booking) -> StoreResult<()> {
        self.collection::<Booking>(BOOKINGS).insert_one(booking).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for MongoDB {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Payment>> {
        let cursor = self
            .collection::<Payment>(PAYMENTS)
            .find(doc! { "email": email })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, payment: &Payment) -> StoreResult<ObjectId> {
        let result = self.collection::<Payment>(PAYMENTS).insert_one(payment).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.collection::<Payment>(PAYMENTS).estimated_document_count().await?)
    }

    async fn total_revenue(&self) -> StoreResult<f64> {
        let pipeline = vec![doc! {
            "$group": { "_id": Bson::Null, "revenue": { "$sum": "$price" } }
        }];
        let mut cursor = self
            .collection::<Document>(PAYMENTS)
            .aggregate(pipeline)
            .await?;

        let revenue = match cursor.try_next().await? {
            Some(group) => match group.get("revenue") {
                Some(Bson::Double(value)) => *value,
                Some(Bson::Int32(value)) => f64::from(*value),
                Some(Bson::Int64(value)) => *value as f64,
                _ => 0.0,
            },
            None => 0.0,
        };
        Ok(revenue)
    }
}
