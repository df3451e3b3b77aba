//! Core data models for the expense tracker
//!
//! Users, categories, expenses and the login session, plus the money and ID
//! types they share.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod session;
pub mod user;

pub use category::{Category, CategoryPatch, DefaultCategory, NewCategory};
pub use expense::{Expense, ExpensePatch, NewExpense};
pub use ids::{CategoryId, EntityId, ExpenseId, UserId};
pub use money::Money;
pub use session::Session;
pub use user::{NewUser, PublicUser, Role, User, UserPatch};
