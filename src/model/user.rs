use std::fmt;

use crate::error::Result;
use crate::validation;

#[derive(Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// A user ready to be written: the password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn with_id(self, id: String) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

/// A validated sign-up request.
pub struct Registration {
    email: String,
    password: String,
}

impl Registration {
    pub fn parse(email: String, password: String) -> Result<Self> {
        let email = email.trim().to_string();
        validation::validate_email(&email)?;
        validation::validate_password(&password)?;
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Consumes the registration, replacing the plaintext with its hash.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            email: self.email,
            password_hash,
        }
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}
