//! Ledger domain models, persistence-friendly types, and helpers.

pub mod budgets;
pub mod date_window;
pub mod expense;

pub use budgets::CategoryBudgets;
pub use date_window::DateWindow;
pub use expense::{parse_user_date, Expense, DATE_FORMAT};
