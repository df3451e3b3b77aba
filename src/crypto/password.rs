//! Password hashing using Argon2id
//!
//! Hashes are self-describing PHC strings (`$argon2id$v=19$m=...`), so
//! verification reads the cost parameters back from the hash and keeps
//! working after the configured parameters change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

/// Argon2id cost parameters for new hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    #[serde(default = "default_memory_cost")]
    pub memory_cost: u32,
    /// Iterations (default: 2)
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// Lanes (default: 1)
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_cost() -> u32 {
    Params::DEFAULT_M_COST
}

fn default_time_cost() -> u32 {
    Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    Params::DEFAULT_P_COST
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_cost: default_memory_cost(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

impl HashingParams {
    /// The cheapest parameters Argon2 accepts. Only for tests.
    pub fn minimal() -> Self {
        Self {
            memory_cost: Params::MIN_M_COST,
            time_cost: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(&self) -> ExpenseResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| ExpenseError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash `plaintext` with a fresh random salt
///
/// Blank passwords are rejected. The plaintext is hashed exactly as given,
/// surrounding whitespace included.
pub fn hash_password(plaintext: &str, params: &HashingParams) -> ExpenseResult<String> {
    if plaintext.trim().is_empty() {
        return Err(ExpenseError::Validation("Password cannot be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| ExpenseError::PasswordHash(format!("Hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check `plaintext` against a stored PHC hash
///
/// A malformed hash is a mismatch, never an error.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("admin123", &HashingParams::minimal()).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let params = HashingParams::minimal();
        let first = hash_password("rahasia", &params).unwrap();
        let second = hash_password("rahasia", &params).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("rahasia", &first));
        assert!(verify_password("rahasia", &second));
    }

    #[test]
    fn test_blank_password_rejected() {
        let params = HashingParams::minimal();
        assert!(hash_password("", &params).unwrap_err().is_validation());
        assert!(hash_password("   ", &params).unwrap_err().is_validation());
    }

    #[test]
    fn test_whitespace_is_significant() {
        let hash = hash_password(" padded ", &HashingParams::minimal()).unwrap();
        assert!(verify_password(" padded ", &hash));
        assert!(!verify_password("padded", &hash));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "not-a-hash"));
        assert!(!verify_password("x", "$2b$10$abcdefghijklmnopqrstuv"));
    }

    #[test]
    fn test_invalid_params_error() {
        let params = HashingParams {
            memory_cost: 0,
            time_cost: 0,
            parallelism: 0,
        };
        let err = hash_password("secret", &params).unwrap_err();
        assert!(matches!(err, ExpenseError::PasswordHash(_)));
    }

    #[test]
    fn test_verify_with_params_from_hash() {
        let custom = HashingParams {
            memory_cost: 64,
            time_cost: 1,
            parallelism: 1,
        };
        let hash = hash_password("secret", &custom).unwrap();
        assert!(hash.contains("m=64,t=1,p=1"));
        assert!(verify_password("secret", &hash));
    }
}
