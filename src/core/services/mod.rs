pub mod budget_tracker;
pub mod deletion;
pub mod query;
pub mod resolver;

pub use budget_tracker::{BudgetStatus, BudgetTracker, CategorySpend};
pub use deletion::{parse_positions, DeletionPlan, DeletionRequest};
pub use query::{CalendarGrid, Granularity};
pub use resolver::{Answer, DiceSimilarity, ResolutionFlow, ResolutionStep, Resolved, Similarity};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
}
