use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::{
    errors::{ExpenseError, Result},
    ledger::{CategoryBudgets, Expense},
    storage::{csv, JsonStorage},
};

use super::services::{BudgetStatus, BudgetTracker, DeletionPlan};

/// In-memory working state for one interactive run: the active ledger and
/// budget map, loaded once at startup and persisted after every mutation.
///
/// Owned by the top-level loop and passed by reference to handlers; there
/// are no ambient globals.
pub struct Session {
    storage: JsonStorage,
    expenses: Vec<Expense>,
    budgets: CategoryBudgets,
}

impl Session {
    pub fn open(storage: JsonStorage) -> Result<Self> {
        let expenses = storage.load_expenses()?;
        let budgets = storage.load_budgets()?;
        tracing::info!(
            expenses = expenses.len(),
            budgets = budgets.len(),
            "session opened"
        );
        Ok(Self {
            storage,
            expenses,
            budgets,
        })
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn budgets(&self) -> &CategoryBudgets {
        &self.budgets
    }

    /// Union of budget-map keys and ledger categories, deduplicated
    /// case-insensitively. Budget-map casing wins where both exist.
    pub fn known_categories(&self) -> Vec<String> {
        let mut known: Vec<String> = self.budgets.names().map(str::to_string).collect();
        for expense in &self.expenses {
            if !known
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&expense.category))
            {
                known.push(expense.category.clone());
            }
        }
        known
    }

    /// Registers a category budget and persists the budget map immediately,
    /// independent of whether a pending expense add succeeds afterwards.
    pub fn register_budget(&mut self, name: &str, limit: f64) -> Result<()> {
        if limit <= 0.0 {
            return Err(ExpenseError::InvalidInput(
                "budget must be strictly positive".into(),
            ));
        }
        self.budgets.set(name, limit);
        self.storage.save_budgets(&self.budgets)
    }

    /// Appends an expense stamped with the current local time, persists the
    /// ledger, and reports the category's month-to-date standing.
    pub fn add_expense(&mut self, amount: f64, category: &str) -> Result<(BudgetStatus, f64)> {
        self.add_expense_at(amount, category, Local::now().naive_local())
    }

    pub fn add_expense_at(
        &mut self,
        amount: f64,
        category: &str,
        date: NaiveDateTime,
    ) -> Result<(BudgetStatus, f64)> {
        if amount <= 0.0 {
            return Err(ExpenseError::InvalidInput(
                "amount must be strictly positive".into(),
            ));
        }
        if category.trim().is_empty() {
            return Err(ExpenseError::InvalidInput("category must not be empty".into()));
        }
        self.expenses.push(Expense::new(amount, category, date));
        self.storage.save_expenses(&self.expenses)?;

        let spent = BudgetTracker::monthly_total(&self.expenses, category, date);
        let status = BudgetTracker::classify(spent, self.budgets.limit(category));
        Ok((status, spent))
    }

    /// Replaces the record at a zero-based index and persists the ledger.
    pub fn edit_expense(&mut self, index: usize, updated: Expense) -> Result<()> {
        if updated.amount <= 0.0 {
            return Err(ExpenseError::InvalidInput(
                "amount must be strictly positive".into(),
            ));
        }
        if updated.category.trim().is_empty() {
            return Err(ExpenseError::InvalidInput("category must not be empty".into()));
        }
        let slot = self.expenses.get_mut(index).ok_or_else(|| {
            ExpenseError::InvalidInput(format!("no expense at position {}", index + 1))
        })?;
        *slot = updated;
        self.storage.save_expenses(&self.expenses)
    }

    /// Applies a validated deletion plan: removed records go to the audit
    /// log first, then the trimmed ledger is persisted. A crash between
    /// the two can over-record in the audit log but never lose evidence.
    pub fn delete_expenses(&mut self, plan: &DeletionPlan) -> Result<Vec<Expense>> {
        let removed = plan.execute(&mut self.expenses);
        self.storage.append_to_audit_log(&removed)?;
        self.storage.save_expenses(&self.expenses)?;
        tracing::info!(removed = removed.len(), "expenses deleted");
        Ok(removed)
    }

    pub fn audit_log(&self) -> Result<Vec<Expense>> {
        self.storage.load_audit_log()
    }

    /// Appends records from a CSV file verbatim, bypassing resolution and
    /// budget provisioning, then persists. Returns the number imported.
    pub fn import_csv(&mut self, path: &Path) -> Result<usize> {
        let imported = csv::import_expenses(path)?;
        let count = imported.len();
        if count > 0 {
            self.expenses.extend(imported);
            self.storage.save_expenses(&self.expenses)?;
        }
        Ok(count)
    }

    /// Writes the full ledger to a CSV file. Returns the number exported.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        csv::export_expenses(path, &self.expenses)?;
        Ok(self.expenses.len())
    }
}
