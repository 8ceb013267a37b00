use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CatalogStore, EVENTS_COLLECTION, USERS_COLLECTION};
use crate::error::{CatalogError, Result};
use crate::model::{Event, NewEvent, NewUser, User};

/// Database used when neither the config nor the connection string names one.
pub const DEFAULT_DATABASE: &str = "event-catalog";

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Serialize, Deserialize)]
struct EventDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    description: String,
    price: f64,
    date: bson::DateTime,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    email: String,
    password: String,
}

impl EventDocument {
    fn into_event(self) -> Result<Event> {
        let id = self
            .id
            .ok_or_else(|| CatalogError::CorruptRecord("event document without _id".to_string()))?;
        let date = DateTime::from_timestamp_millis(self.date.timestamp_millis())
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                CatalogError::CorruptRecord(format!("event {} has an out-of-range date", id))
            })?;

        Ok(Event {
            id: id.to_hex(),
            title: self.title,
            description: self.description,
            price: self.price,
            date,
        })
    }
}

impl UserDocument {
    fn into_user(self) -> Result<User> {
        let id = self
            .id
            .ok_or_else(|| CatalogError::CorruptRecord("user document without _id".to_string()))?;
        Ok(User {
            id: id.to_hex(),
            email: self.email,
            password_hash: self.password,
        })
    }
}

/// Dates are stored as BSON dates at UTC midnight.
fn to_bson_date(date: NaiveDate) -> bson::DateTime {
    bson::DateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn inserted_object_id(inserted: &bson::Bson, collection: &str) -> Result<ObjectId> {
    inserted.as_object_id().ok_or_else(|| {
        CatalogError::CorruptRecord(format!(
            "{} insert returned a non-ObjectId _id: {}",
            collection, inserted
        ))
    })
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

pub struct MongoStore {
    client: Client,
    events: Collection<EventDocument>,
    users: Collection<UserDocument>,
}

impl MongoStore {
    /// Connects to MongoDB and prepares the collections.
    ///
    /// `database` overrides the database named in the connection string; with
    /// neither, [`DEFAULT_DATABASE`] is used. The server is pinged so a bad
    /// URI fails at startup rather than on the first request.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        db.run_command(doc! { "ping": 1 }).await?;
        info!(database = db.name(), "MongoDB database connection established successfully");

        Self::ensure_indexes(&db).await?;

        Ok(Self {
            events: db.collection(EVENTS_COLLECTION),
            users: db.collection(USERS_COLLECTION),
            client,
        })
    }

    async fn ensure_indexes(db: &Database) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        db.collection::<UserDocument>(USERS_COLLECTION)
            .create_index(index)
            .await?;
        debug!("ensured unique index on users.email");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn list_events(&self) -> Result<Vec<Event>> {
        let documents: Vec<EventDocument> = self.events.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(EventDocument::into_event).collect()
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        let document = EventDocument {
            id: None,
            title: event.title.clone(),
            description: event.description.clone(),
            price: event.price,
            date: to_bson_date(event.date),
        };
        let result = self.events.insert_one(&document).await?;
        let id = inserted_object_id(&result.inserted_id, EVENTS_COLLECTION)?;
        Ok(event.with_id(id.to_hex()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let documents: Vec<UserDocument> = self.users.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(UserDocument::into_user).collect()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await?
            .map(UserDocument::into_user)
            .transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let document = UserDocument {
            id: None,
            email: user.email.clone(),
            password: user.password_hash.clone(),
        };
        let result = match self.users.insert_one(&document).await {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => return Err(CatalogError::DuplicateEmail(user.email)),
            Err(e) => return Err(e.into()),
        };
        let id = inserted_object_id(&result.inserted_id, USERS_COLLECTION)?;
        Ok(user.with_id(id.to_hex()))
    }

    async fn shutdown(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
        Ok(())
    }
}
