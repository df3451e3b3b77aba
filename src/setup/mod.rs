//! First-run setup
//!
//! Detects whether the store has been set up, repairs a half-finished
//! setup, and seeds the default categories and the first administrator.

pub mod sequencer;

pub use sequencer::{FirstRunInput, InitState, Initializer};
