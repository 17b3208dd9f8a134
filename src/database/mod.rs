use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::store::StoreError;

pub const USERS: &str = "users";
pub const CLASSES: &str = "classes";
pub const INSTRUCTORS: &str = "instructors";
pub const BOOKINGS: &str = "bookings";
pub const PAYMENTS: &str = "payments";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("camp-booking-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the lookup indexes used by the route handlers.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = [
            (USERS, doc! { "email": 1 }, Some(unique())),
            (CLASSES, doc! { "email": 1 }, None),
            (CLASSES, doc! { "instructor": 1, "status": 1 }, None),
            (INSTRUCTORS, doc! { "userId": 1 }, Some(unique())),
            (BOOKINGS, doc! { "email": 1 }, None),
            (PAYMENTS, doc! { "email": 1 }, None),
        ];

        for (collection, keys, options) in indexes {
            let description = format!("{}({})", collection, keys);
            let model = IndexModel::builder().keys(keys).options(options).build();

            match self
                .collection::<mongodb::bson::Document>(collection)
                .create_index(model)
                .await
            {
                Ok(_) => log::info!("   ✅ Index ready: {}", description),
                Err(e) => log::debug!("   ℹ️  Index not created {}: {}", description, e),
            }
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Closes pooled connections once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
