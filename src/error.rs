use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User with email {0} exists already")]
    DuplicateEmail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Whether the caller can fix this by sending different input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::DuplicateEmail(_)
        )
    }

    /// Machine-readable code attached to GraphQL errors under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "BAD_USER_INPUT",
            CatalogError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        // Infrastructure details stay in the server log.
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        };
        let code = self.code();
        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
