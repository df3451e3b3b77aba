//! Service layer for the expense tracker
//!
//! The service layer adds validation, authorization and cross-entity checks
//! on top of the repositories.

pub mod auth;
pub mod category;
pub mod expense;
pub mod user;

pub use auth::{AuthService, LoginFailure, NewUserInput};
pub use category::CategoryService;
pub use expense::{ExpenseInput, ExpenseService};
pub use user::UserService;
