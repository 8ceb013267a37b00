use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use tracing::error;

use crate::catalog::Catalog;
use crate::error::CatalogError;

use super::types::*;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(catalog: Catalog) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(catalog)
        .finish()
}

/// SDL of the schema, without needing a backend.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn resolver_error(err: CatalogError) -> async_graphql::Error {
    if !err.is_client_error() {
        error!(error = %err, "resolver failed");
    }
    err.extend()
}

pub struct QueryRoot;

#[Object(name = "RootQuery")]
impl QueryRoot {
    /// List all events
    async fn events(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Event>> {
        let catalog = ctx.data::<Catalog>()?;
        let events = catalog.events().await.map_err(resolver_error)?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let catalog = ctx.data::<Catalog>()?;
        let users = catalog.users().await.map_err(resolver_error)?;
        Ok(users.into_iter().map(User::from).collect())
    }
}

pub struct MutationRoot;

#[Object(name = "RootMutation")]
impl MutationRoot {
    /// Create a new event
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        event_input: EventInput,
    ) -> async_graphql::Result<Event> {
        let catalog = ctx.data::<Catalog>()?;
        let new_event = event_input.into_new_event().map_err(resolver_error)?;
        let event = catalog
            .create_event(new_event)
            .await
            .map_err(resolver_error)?;
        Ok(event.into())
    }

    /// Register a new user. Fails if the email is already registered.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        user_input: UserInput,
    ) -> async_graphql::Result<User> {
        let catalog = ctx.data::<Catalog>()?;
        let registration = user_input.into_registration().map_err(resolver_error)?;
        let user = catalog
            .register_user(registration)
            .await
            .map_err(resolver_error)?;
        Ok(user.into())
    }
}
