//! Authentication service
//!
//! Password hashing, the login/logout flow and user creation. Login never
//! says why it failed: an unknown username, a record without a password and
//! a wrong password all come back as `None`. The actual cause is only
//! recorded in the diagnostic log.

use std::fmt;

use chrono::Utc;

use crate::crypto::{self, HashingParams, SecureString};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{NewUser, PublicUser, Role, Session, User};
use crate::storage::Storage;

/// Why a login attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    UnknownUser,
    MissingHash,
    WrongPassword,
}

impl LoginFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownUser => "unknown_user",
            Self::MissingHash => "missing_hash",
            Self::WrongPassword => "wrong_password",
        }
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields for creating an account
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub name: String,
    pub username: String,
    pub password: SecureString,
    pub role: Role,
}

impl NewUserInput {
    /// A regular user account
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecureString>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Service for authentication and session handling
pub struct AuthService<'a> {
    storage: &'a Storage,
    params: HashingParams,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, params: HashingParams) -> Self {
        Self { storage, params }
    }

    /// Hash a plaintext password with the configured cost
    pub fn hash_password(&self, plaintext: &str) -> ExpenseResult<String> {
        crypto::hash_password(plaintext, &self.params)
    }

    pub fn verify_password(plaintext: &str, hash: &str) -> bool {
        crypto::verify_password(plaintext, hash)
    }

    /// Check credentials, keeping the reason for a refusal
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, LoginFailure> {
        let user = self
            .storage
            .users
            .find_by_username(username)
            .ok_or(LoginFailure::UnknownUser)?;

        if !user.has_password() {
            return Err(LoginFailure::MissingHash);
        }

        if !Self::verify_password(password, &user.password_hash) {
            return Err(LoginFailure::WrongPassword);
        }

        Ok(user)
    }

    /// Log in and persist a session; `None` on any failure
    pub fn login(&self, username: &str, password: &str) -> Option<Session> {
        match self.authenticate(username, password) {
            Ok(user) => {
                let session = Session::for_user(&user, Utc::now());
                self.storage.session.save(&session);
                tracing::info!(username = %user.username, role = %user.role, "login succeeded");
                Some(session)
            }
            Err(reason) => {
                tracing::info!(username = %username, reason = %reason, "login refused");
                None
            }
        }
    }

    pub fn logout(&self) {
        self.storage.session.clear();
        tracing::info!("logged out");
    }

    /// Create an account and return it without its hash
    ///
    /// Usernames are unique; the name and username are trimmed.
    pub fn create_user(&self, input: NewUserInput) -> ExpenseResult<PublicUser> {
        let name = input.name.trim();
        let username = input.username.trim();

        if name.is_empty() {
            return Err(ExpenseError::Validation("Name cannot be empty".into()));
        }
        if username.is_empty() {
            return Err(ExpenseError::Validation("Username cannot be empty".into()));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(ExpenseError::Validation(
                "Username cannot contain whitespace".into(),
            ));
        }
        if self.storage.users.find_by_username(username).is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = self.storage.users.add(NewUser {
            name: name.to_string(),
            username: username.to_string(),
            password_hash,
            role: input.role,
        });

        tracing::info!(username = %user.username, role = %user.role, "user created");
        Ok(user.to_public())
    }

    /// The persisted session, if any
    pub fn current_session(&self) -> Option<Session> {
        self.storage.session.get()
    }

    /// The user behind the current session
    ///
    /// A session whose user no longer exists is cleared.
    pub fn current_user(&self) -> Option<User> {
        let session = self.current_session()?;
        match self.storage.users.get(session.user_id) {
            Some(user) => Some(user),
            None => {
                tracing::warn!(username = %session.username, "session user no longer exists, clearing session");
                self.storage.session.clear();
                None
            }
        }
    }

    /// The logged-in user, or `NotAuthenticated`
    pub fn require_user(&self) -> ExpenseResult<User> {
        self.current_user().ok_or(ExpenseError::NotAuthenticated)
    }

    /// The logged-in user if they are an admin
    ///
    /// Uses the stored role, not the one captured in the session.
    pub fn require_admin(&self) -> ExpenseResult<User> {
        let user = self.require_user()?;
        if user.role.is_admin() {
            Ok(user)
        } else {
            Err(ExpenseError::PermissionDenied(
                "this action requires an administrator".into(),
            ))
        }
    }
}
