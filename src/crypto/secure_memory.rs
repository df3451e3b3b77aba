//! Secure memory handling for passwords
//!
//! Plaintext passwords read from the terminal or the environment live in a
//! [`SecureString`], which wipes its buffer on drop.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that zeroes its contents on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Number of characters, as used for minimum-length checks
    pub fn char_len(&self) -> usize {
        self.inner.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<str> for SecureString {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString([REDACTED])")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacted() {
        let s = SecureString::new("admin123");
        assert_eq!(format!("{:?}", s), "SecureString([REDACTED])");
        assert_eq!(s.to_string(), "[REDACTED]");
        assert_eq!(s.as_str(), "admin123");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(SecureString::new("sandi€").char_len(), 6);
        assert!(SecureString::new("  ").is_blank());
    }

    #[test]
    fn test_zeroize_clears() {
        let mut s = SecureString::new("rahasia");
        s.zeroize();
        assert!(s.is_empty());
    }
}
