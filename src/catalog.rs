//! Catalog operations shared by the GraphQL resolvers.
//!
//! Each operation is a single sequential chain against the store. Failures are
//! returned as [`CatalogError`] and never recovered from here.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::model::{Event, NewEvent, Registration, User};
use crate::password::PasswordHasher;
use crate::storage::CatalogStore;

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    hasher: PasswordHasher,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub async fn events(&self) -> Result<Vec<Event>> {
        self.store.list_events().await
    }

    pub async fn create_event(&self, event: NewEvent) -> Result<Event> {
        let event = self.store.insert_event(event).await?;
        info!(id = %event.id, title = %event.title, "created event");
        Ok(event)
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    /// Registers a user: existence check, hash, write.
    ///
    /// A taken email fails with [`CatalogError::DuplicateEmail`] before any
    /// hashing or write happens.
    pub async fn register_user(&self, registration: Registration) -> Result<User> {
        if self
            .store
            .find_user_by_email(registration.email())
            .await?
            .is_some()
        {
            return Err(CatalogError::DuplicateEmail(
                registration.email().to_string(),
            ));
        }

        let password_hash = self
            .hasher
            .hash_blocking(registration.password().to_string())
            .await?;
        let user = self
            .store
            .insert_user(registration.into_new_user(password_hash))
            .await?;
        info!(id = %user.id, "created user");
        debug!(id = %user.id, email = %user.email, "registered email");
        Ok(user)
    }
}
