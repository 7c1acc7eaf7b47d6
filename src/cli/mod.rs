pub mod handlers;
pub mod io;
pub mod output;
pub mod shell;

use crate::core::services::ServiceError;
use crate::errors::ExpenseError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Expense(#[from] ExpenseError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
