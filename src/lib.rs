//! Expense Tracker - local family expense tracking
//!
//! This library provides the core functionality for the `expense` command.
//! Data lives in a small key-value store of JSON documents on this machine;
//! an administrator sets the tracker up, manages categories and accounts,
//! and every member records expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, categories, expenses, session)
//! - `storage`: Key-value store and entity repositories
//! - `crypto`: Password hashing
//! - `services`: Authentication and business logic
//! - `setup`: First-run setup and startup repair
//! - `audit`: Audit logging system
//! - `reports`: Dashboard, listings and spending reports
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::app::App;
//!
//! let app = App::open()?;
//! if let Some(session) = app.auth().login("admin", "admin123") {
//!     println!("logged in as {}", session.username);
//! }
//! ```

pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod setup;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
