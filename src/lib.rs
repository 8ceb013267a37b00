//! # event-catalog - a GraphQL backend for events and users
//!
//! A single `/graphql` endpoint over a MongoDB document store with two
//! collections, `events` and `users`. Registration hashes passwords with
//! Argon2id before they are written.
//!
//! ## Quick Start
//!
//! ```bash
//! # Against MongoDB
//! ATLAS_URI=mongodb://localhost:27017/catalog event-catalog serve
//!
//! # Without a database
//! event-catalog serve --in-memory --port 5002
//!
//! # Print the schema
//! event-catalog schema
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The operations behind each resolver
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Server settings from flags and environment
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Data models (Event, User)
//! - [`password`]: Password hashing
//! - [`server`]: HTTP routes
//! - [`storage`]: MongoDB and in-memory stores
//! - [`validation`]: Input validation utilities

pub mod catalog;

/// Command-line interface definitions using clap.
pub mod cli;

/// Server configuration.
///
/// Every setting is a flag with an environment variable fallback.
pub mod config;

/// Error types and result aliases.
///
/// Defines `CatalogError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

pub mod logging;

/// Data models for events and users.
pub mod model;

pub mod password;
pub mod server;

/// Persistence layer.
///
/// `CatalogStore` with MongoDB and in-memory implementations.
pub mod storage;

/// Input validation utilities.
///
/// Validates titles, descriptions, prices, dates, emails and passwords at the
/// GraphQL boundary.
pub mod validation;
