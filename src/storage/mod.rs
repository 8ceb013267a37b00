//! Persistence layer for the catalog.
//!
//! Two collections are kept: `events` and `users`. Resolvers talk to them
//! through the [`CatalogStore`] trait so the server can run against MongoDB or
//! a process-local store.
//!
//! ## Components
//!
//! - [`CatalogStore`]: The operations the catalog needs from a backend
//! - [`MongoStore`]: MongoDB backend using the official driver
//! - [`MemoryStore`]: In-process backend for development and tests

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Event, NewEvent, NewUser, User};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Collection holding event documents.
pub const EVENTS_COLLECTION: &str = "events";

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All events in the backend's natural order.
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// Writes one event and returns it with its generated identifier.
    async fn insert_event(&self, event: NewEvent) -> Result<Event>;

    /// All users in the backend's natural order.
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Writes one user. Fails with `DuplicateEmail` if the email is taken,
    /// even when a concurrent registration won the earlier existence check.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Releases the backend's connections. Called once on shutdown.
    async fn shutdown(&self) -> Result<()>;
}
