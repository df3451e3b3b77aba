//! Password hashing and secret handling
//!
//! Argon2id PHC hashes for stored passwords, and a zeroizing string for
//! plaintext passwords while they are in memory.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, verify_password, HashingParams};
pub use secure_memory::SecureString;
