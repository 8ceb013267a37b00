//! GraphQL schema and resolvers for the catalog.
//!
//! ## Schema
//!
//! - **Queries** (`RootQuery`): `events`, `users`
//! - **Mutations** (`RootMutation`): `createEvent(eventInput)`, `createUser(userInput)`
//!
//! ```graphql
//! mutation {
//!   createEvent(eventInput: { title: "Concert", description: "Live show", price: 25.5, date: "2024-05-01" }) {
//!     _id
//!     date
//!   }
//! }
//! ```
//!
//! Errors carry `extensions.code`: `BAD_USER_INPUT`, `DUPLICATE_EMAIL`, or
//! `INTERNAL_SERVER_ERROR`.

mod schema;
mod types;

pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema, schema_sdl};
pub use types::*;
