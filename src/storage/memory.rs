use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::model::{Event, NewEvent, NewUser, User};

/// Keeps both collections in memory for the lifetime of the process.
///
/// Identifiers are ObjectId hex strings so clients see the same shape as
/// with MongoDB.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        let event = event.with_id(ObjectId::new().to_hex());
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(CatalogError::DuplicateEmail(user.email));
        }
        let user = user.with_id(ObjectId::new().to_hex());
        users.push(user.clone());
        Ok(user)
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "desc".to_string(),
            price: 10.0,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_events_keep_insertion_order() {
        let store = MemoryStore::new();
        let first = store.insert_event(new_event("first")).await.unwrap();
        let second = store.insert_event(new_event("second")).await.unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events, vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_are_unique_object_ids() {
        let store = MemoryStore::new();
        let a = store.insert_event(new_event("a")).await.unwrap();
        let b = store.insert_event(new_event("b")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(ObjectId::parse_str(&a.id).is_ok());
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let store = MemoryStore::new();
        assert!(store.find_user_by_email("a@b.com").await.unwrap().is_none());

        let user = store.insert_user(new_user("a@b.com")).await.unwrap();
        let found = store.find_user_by_email("a@b.com").await.unwrap();
        assert_eq!(found, Some(user));
        assert!(store.find_user_by_email("c@d.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_user_enforces_unique_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@b.com")).await.unwrap();

        let err = store.insert_user(new_user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEmail(ref e) if e == "a@b.com"));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }
}
