//! Initialization sequencer
//!
//! Decides whether first-run setup is needed and performs it. Setup writes
//! three keys one after another (categories, the admin user, the flag), so
//! a crash can leave the store half set up. Two rules recover from that:
//! a set flag with no users is cleared on start, and a setup run on an
//! uninitialized store discards users left behind by an interrupted run.

use chrono::Utc;

use crate::config::Settings;
use crate::crypto::SecureString;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, DefaultCategory, PublicUser, Role};
use crate::services::auth::{AuthService, NewUserInput};
use crate::storage::Storage;

/// Observed initialization state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    NotInitialized,
    /// Flag set but no users; repaired on start
    InitializedNoUsers,
    Initialized,
}

/// The first-run form
#[derive(Debug, Clone)]
pub struct FirstRunInput {
    pub name: String,
    pub username: String,
    pub password: SecureString,
    pub confirm_password: SecureString,
}

impl FirstRunInput {
    fn validate(&self, min_password_length: usize) -> ExpenseResult<()> {
        let blank = self.name.trim().is_empty()
            || self.username.trim().is_empty()
            || self.password.is_blank()
            || self.confirm_password.is_blank();
        if blank {
            return Err(ExpenseError::Validation("All fields are required".into()));
        }

        if self.password != self.confirm_password {
            return Err(ExpenseError::Validation("Passwords do not match".into()));
        }

        if self.password.char_len() < min_password_length {
            return Err(ExpenseError::Validation(format!(
                "Password must be at least {} characters",
                min_password_length
            )));
        }

        Ok(())
    }
}

pub struct Initializer<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> Initializer<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Current state, without repairing anything
    pub fn inspect(&self) -> InitState {
        if !self.storage.is_initialized() {
            InitState::NotInitialized
        } else if self.storage.users.is_empty() {
            InitState::InitializedNoUsers
        } else {
            InitState::Initialized
        }
    }

    /// Startup check; returns whether the app is ready for login
    ///
    /// An initialized flag without any users is removed, sending the app
    /// back to first-run setup.
    pub fn check_on_start(&self) -> bool {
        match self.inspect() {
            InitState::Initialized => true,
            InitState::NotInitialized => false,
            InitState::InitializedNoUsers => {
                tracing::warn!("store is marked initialized but has no users, resetting");
                self.storage.clear_initialized();
                false
            }
        }
    }

    /// Complete first-run setup and return the new administrator
    pub fn run_first_setup(&self, input: FirstRunInput) -> ExpenseResult<PublicUser> {
        if self.check_on_start() {
            return Err(ExpenseError::AlreadyInitialized);
        }
        input.validate(self.settings.min_password_length)?;

        let leftover = self.storage.users.count();
        if leftover > 0 {
            tracing::warn!(users = leftover, "discarding users from an interrupted setup");
            self.storage.users.save_all(&[]);
        }

        let categories = self.seed_default_categories();

        let new_admin = NewUserInput {
            name: input.name,
            username: input.username,
            password: input.password,
            role: Role::Admin,
        };
        let admin = AuthService::new(self.storage, self.settings.password_hashing)
            .create_user(new_admin)?;

        self.storage.mark_initialized();
        tracing::info!(
            admin = %admin.username,
            categories = categories.len(),
            "first-run setup complete"
        );
        Ok(admin)
    }

    /// Write the default categories into an empty collection
    ///
    /// Existing categories are kept as they are, so expenses recorded before
    /// a repaired setup stay linked to their category.
    pub fn seed_default_categories(&self) -> Vec<Category> {
        let existing = self.storage.categories.get_all();
        if !existing.is_empty() {
            tracing::info!(categories = existing.len(), "keeping existing categories");
            return existing;
        }

        let now = Utc::now();
        let categories: Vec<Category> = DefaultCategory::all()
            .iter()
            .map(|d| d.to_category(now))
            .collect();
        self.storage.categories.save_all(&categories);
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HashingParams;
    use crate::models::{Money, NewCategory, NewExpense, NewUser};
    use chrono::NaiveDate;

    fn settings() -> Settings {
        Settings {
            password_hashing: HashingParams::minimal(),
            ..Settings::default()
        }
    }

    fn input(password: &str, confirm: &str) -> FirstRunInput {
        FirstRunInput {
            name: "Administrator".into(),
            username: "admin".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_first_run_scenario() {
        let storage = Storage::in_memory();
        let settings = settings();
        let init = Initializer::new(&storage, &settings);

        assert!(!init.check_on_start());

        let admin = init.run_first_setup(input("admin123", "admin123")).unwrap();
        assert_eq!(admin.role, Role::Admin);

        assert!(init.check_on_start());
        assert_eq!(storage.users.count(), 1);
        assert_eq!(storage.categories.count(), 8);

        let session = AuthService::new(&storage, settings.password_hashing)
            .login("admin", "admin123")
            .unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_default_category_names() {
        let storage = Storage::in_memory();
        let settings = settings();
        Initializer::new(&storage, &settings).seed_default_categories();

        let names: Vec<_> = storage
            .categories
            .get_all()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            [
                "Makanan & Minuman",
                "Transportasi",
                "Belanja",
                "Tagihan",
                "Kesehatan",
                "Pendidikan",
                "Hiburan",
                "Lainnya"
            ]
        );
    }

    #[test]
    fn test_flag_without_users_is_repaired() {
        let storage = Storage::in_memory();
        let settings = settings();
        storage.mark_initialized();
        let init = Initializer::new(&storage, &settings);

        assert_eq!(init.inspect(), InitState::InitializedNoUsers);
        assert!(!init.check_on_start());
        assert!(!storage.is_initialized());
        assert_eq!(init.inspect(), InitState::NotInitialized);
    }

    #[test]
    fn test_setup_twice_fails() {
        let storage = Storage::in_memory();
        let settings = settings();
        let init = Initializer::new(&storage, &settings);
        init.run_first_setup(input("admin123", "admin123")).unwrap();

        let err = init.run_first_setup(input("admin123", "admin123")).unwrap_err();
        assert!(matches!(err, ExpenseError::AlreadyInitialized));
        assert_eq!(storage.users.count(), 1);
    }

    #[test]
    fn test_input_validation() {
        let storage = Storage::in_memory();
        let settings = settings();
        let init = Initializer::new(&storage, &settings);

        assert!(init
            .run_first_setup(input("admin123", "admin124"))
            .unwrap_err()
            .is_validation());
        assert!(init
            .run_first_setup(input("abc", "abc"))
            .unwrap_err()
            .is_validation());
        assert!(init.run_first_setup(input("", "")).unwrap_err().is_validation());

        assert!(!storage.is_initialized());
        assert!(storage.categories.is_empty());
    }

    #[test]
    fn test_setup_after_lost_users_keeps_expense_categories() {
        let storage = Storage::in_memory();
        let settings = settings();
        let init = Initializer::new(&storage, &settings);
        let admin = init.run_first_setup(input("admin123", "admin123")).unwrap();

        let shopping = storage
            .categories
            .get_all()
            .into_iter()
            .find(|c| c.name == "Belanja")
            .unwrap();
        let expense = storage.expenses.add(NewExpense {
            title: "Sepatu".into(),
            amount: Money::from_units(350_000),
            category_id: shopping.id,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            notes: None,
            user_id: admin.id,
        });

        storage.users.save_all(&[]);
        assert!(!init.check_on_start());
        init.run_first_setup(input("admin123", "admin123")).unwrap();

        assert_eq!(storage.categories.count(), 8);
        let stored = storage.expenses.get(expense.id).unwrap();
        let category = storage.categories.get(stored.category_id).unwrap();
        assert_eq!(category.name, "Belanja");
    }

    #[test]
    fn test_seeding_leaves_custom_categories() {
        let storage = Storage::in_memory();
        let settings = settings();
        storage
            .categories
            .add(NewCategory::new("Liburan", "#00AA00"));

        let seeded = Initializer::new(&storage, &settings).seed_default_categories();
        assert_eq!(seeded.len(), 1);
        assert_eq!(storage.categories.get_all()[0].name, "Liburan");
    }

    #[test]
    fn test_interrupted_setup_is_recoverable() {
        let storage = Storage::in_memory();
        let settings = settings();
        storage.users.add(NewUser {
            name: "Administrator".into(),
            username: "admin".into(),
            password_hash: "$argon2id$stale".into(),
            role: Role::Admin,
        });
        let init = Initializer::new(&storage, &settings);

        init.run_first_setup(input("admin123", "admin123")).unwrap();
        assert_eq!(storage.users.count(), 1);
        assert!(AuthService::new(&storage, settings.password_hashing)
            .login("admin", "admin123")
            .is_some());
    }
}
