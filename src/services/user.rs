//! User management service
//!
//! Admin-only account administration. At least one admin always remains,
//! and an admin cannot delete their own account. Expenses of a deleted user
//! are kept.

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{PublicUser, User, UserId};
use crate::storage::Storage;

use super::auth::{AuthService, NewUserInput};

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// All users, admins first, then by username
    pub fn list(&self, actor: &User) -> ExpenseResult<Vec<PublicUser>> {
        require_admin(actor)?;

        let mut users: Vec<_> = self
            .storage
            .users
            .get_all()
            .into_iter()
            .map(PublicUser::from)
            .collect();
        users.sort_by(|a, b| {
            b.role
                .is_admin()
                .cmp(&a.role.is_admin())
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(users)
    }

    /// Create an account on behalf of an admin
    pub fn create(&self, actor: &User, input: NewUserInput) -> ExpenseResult<PublicUser> {
        require_admin(actor)?;
        check_password_length(&input, self.settings.min_password_length)?;

        AuthService::new(self.storage, self.settings.password_hashing).create_user(input)
    }

    /// Delete an account
    pub fn delete(&self, actor: &User, identifier: &str) -> ExpenseResult<PublicUser> {
        require_admin(actor)?;

        let target = self
            .find(identifier)?
            .ok_or_else(|| ExpenseError::user_not_found(identifier))?;

        if target.id == actor.id {
            return Err(ExpenseError::PermissionDenied(
                "you cannot delete your own account".into(),
            ));
        }

        if target.role.is_admin() && self.storage.users.admins().len() <= 1 {
            return Err(ExpenseError::PermissionDenied(
                "the last administrator cannot be deleted".into(),
            ));
        }

        self.storage.users.delete(target.id);
        tracing::info!(username = %target.username, by = %actor.username, "user deleted");
        Ok(target.to_public())
    }

    /// Find a user by username or ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<User>> {
        if let Some(user) = self.storage.users.find_by_username(identifier.trim()) {
            return Ok(Some(user));
        }

        let mut matches = self.storage.users.find_matching(identifier);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(ExpenseError::Validation(format!(
                "'{}' matches more than one user; use more characters of the ID",
                identifier
            ))),
        }
    }

    /// A user by exact ID, without the hash
    pub fn get(&self, id: UserId) -> Option<PublicUser> {
        self.storage.users.get(id).map(PublicUser::from)
    }
}

fn require_admin(actor: &User) -> ExpenseResult<()> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(ExpenseError::PermissionDenied(
            "only administrators can manage users".into(),
        ))
    }
}

fn check_password_length(input: &NewUserInput, min_len: usize) -> ExpenseResult<()> {
    if input.password.char_len() < min_len {
        return Err(ExpenseError::Validation(format!(
            "Password must be at least {} characters",
            min_len
        )));
    }
    Ok(())
}
