//! Argon2id password hashing for user registration.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! the parameters and the per-hash random salt travel with the stored value and
//! verification needs nothing but the plaintext.

use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{CatalogError, Result};

/// Default time cost (Argon2 iterations).
pub const DEFAULT_HASH_COST: u32 = 3;

/// Lowest accepted time cost.
pub const MIN_HASH_COST: u32 = 1;

/// Highest accepted time cost.
pub const MAX_HASH_COST: u32 = 32;

#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Builds a hasher with the given time cost and Argon2's default memory
    /// and parallelism settings.
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(CatalogError::Config(format!(
                "Password hash cost must be between {} and {}, got {}",
                MIN_HASH_COST, MAX_HASH_COST, cost
            )));
        }

        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| CatalogError::Config(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    pub fn cost(&self) -> u32 {
        self.params.t_cost()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        use argon2::password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CatalogError::PasswordHash(e.to_string()))
    }

    /// Runs [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CatalogError::PasswordHash(format!("hashing task failed: {}", e)))?
    }
}

/// Checks `password` against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash
/// cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CatalogError::PasswordHash(format!("malformed stored hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_HASH_COST).unwrap()
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = fast_hasher().hash("secret123").unwrap();
        assert_ne!(hash.as_bytes(), b"secret123");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret123", &first).unwrap());
        assert!(verify_password("secret123", &second).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_verify() {
        let hash = fast_hasher().hash("secret123").unwrap();
        assert!(!verify_password("secret124", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_cost_is_encoded_in_hash() {
        let hasher = PasswordHasher::new(2).unwrap();
        assert_eq!(hasher.cost(), 2);
        let hash = hasher.hash("pw").unwrap();
        assert!(hash.contains("t=2"));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(PasswordHasher::new(0).is_err());
        assert!(PasswordHasher::new(MAX_HASH_COST + 1).is_err());
        assert!(PasswordHasher::new(DEFAULT_HASH_COST).is_ok());
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn test_hash_blocking() {
        let hash = fast_hasher()
            .hash_blocking("secret123".to_string())
            .await
            .unwrap();
        assert!(verify_password("secret123", &hash).unwrap());
    }
}
