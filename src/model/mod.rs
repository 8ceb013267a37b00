//! Data models for the catalog.
//!
//! - [`Event`]: A stored event with its generated identifier
//! - [`NewEvent`]: A validated event that has not been persisted yet
//! - [`User`]: A stored user; the password is only ever held as a hash
//! - [`Registration`]: A validated sign-up request carrying the plaintext password

mod event;
mod user;

pub use event::{Event, NewEvent};
pub use user::{NewUser, Registration, User};
