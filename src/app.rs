//! Application context shared by the CLI commands
//!
//! Opens paths, settings and storage once, runs the startup repair check,
//! and answers the status questions every front-end needs before it can
//! decide between setup, login and the main screens.

use serde::Serialize;

use crate::config::{ExpensePaths, Settings};
use crate::display::DisplayOptions;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Role, Session, User};
use crate::services::AuthService;
use crate::setup::Initializer;
use crate::storage::Storage;

/// Snapshot of what a front-end should show next
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatus {
    pub initialized: bool,
    pub session: Option<Session>,
    /// Role of the logged-in user as currently stored
    pub current_user_role: Option<Role>,
}

pub struct App {
    paths: ExpensePaths,
    settings: Settings,
    storage: Storage,
}

impl App {
    /// Open the application using the default (or env-overridden) paths
    pub fn open() -> ExpenseResult<Self> {
        Self::open_at(ExpensePaths::new()?)
    }

    pub fn open_at(paths: ExpensePaths) -> ExpenseResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let storage = Storage::open(&paths)?;

        let ready = Initializer::new(&storage, &settings).check_on_start();
        tracing::debug!(base = %paths.base_dir().display(), ready, "application opened");

        Ok(Self {
            paths,
            settings,
            storage,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::from_settings(&self.settings)
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.storage, self.settings.password_hashing)
    }

    pub fn initializer(&self) -> Initializer<'_> {
        Initializer::new(&self.storage, &self.settings)
    }

    pub fn status(&self) -> AppStatus {
        let auth = self.auth();
        let user = auth.current_user();
        AppStatus {
            initialized: self.storage.is_initialized(),
            session: user.as_ref().and_then(|_| auth.current_session()),
            current_user_role: user.map(|u| u.role),
        }
    }

    pub fn require_initialized(&self) -> ExpenseResult<()> {
        if self.storage.is_initialized() {
            Ok(())
        } else {
            Err(ExpenseError::NotInitialized)
        }
    }

    /// The logged-in user, after checking the store is set up
    pub fn require_user(&self) -> ExpenseResult<User> {
        self.require_initialized()?;
        self.auth().require_user()
    }
}
