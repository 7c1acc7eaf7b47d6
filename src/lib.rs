//! Expense Core offers the ledger, category resolution, and budgeting
//! primitives that power an interactive expense-tracking CLI.

pub mod cli;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        core::utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
