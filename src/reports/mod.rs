//! Reports for the expense tracker
//!
//! Dashboard statistics, the sorted expense list, and per-period spending
//! with category breakdown and trend series.

pub mod dashboard;
pub mod listing;
pub mod period;
pub mod spending;

pub use dashboard::Dashboard;
pub use listing::{ExpenseListing, ExpenseRow, RowBuilder, SortKey, SortOrder};
pub use period::{Granularity, ReportPeriod};
pub use spending::{CategorySlice, SpendingReport, TrendPoint};
