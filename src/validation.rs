//! Input validation for catalog data.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CatalogError, Result};

/// Maximum allowed length for an event title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for an event description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum allowed length for an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Upper bound on password bytes fed to the hasher.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Validates an event title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation("Title cannot be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validates an event description.
pub fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(CatalogError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// Validates an event price. Prices are finite and never negative.
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(CatalogError::Validation(
            "Price must be a finite number".to_string(),
        ));
    }
    if price < 0.0 {
        return Err(CatalogError::Validation(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Parses an event date.
///
/// Accepts a plain calendar date (`2024-05-01`) or an RFC 3339 timestamp, in
/// which case the UTC calendar date is kept.
pub fn parse_event_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            CatalogError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp",
                value
            ))
        })
}

/// Validates an email address.
///
/// Only the shape is checked: one `@` with a non-empty local part and a dotted
/// domain, no whitespace.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(CatalogError::Validation("Email cannot be empty".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CatalogError::Validation(
            "Email cannot contain whitespace".to_string(),
        ));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CatalogError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    };
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(CatalogError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Validates a plaintext password before hashing.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(CatalogError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Password exceeds maximum length of {} bytes",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Concert").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Live show").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(25.5).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_plain_date() {
        let date = parse_event_date("2024-05-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_date_uses_utc_day() {
        let date = parse_event_date("2024-05-01T23:30:00-02:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

        let date = parse_event_date("2024-05-01T10:00:00.000Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_event_date("").is_err());
        assert!(parse_event_date("tomorrow").is_err());
        assert!(parse_event_date("2024-02-30").is_err());
        assert!(parse_event_date("05/01/2024").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last+tag@example.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
        assert!(validate_email("a@.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }
}
