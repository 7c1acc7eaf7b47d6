use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::ledger::{CategoryBudgets, Expense};

/// How close a month's spending sits to its configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    NoBudgetSet,
    UnderBudget,
    NearLimit,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::NoBudgetSet => "no budget set",
            BudgetStatus::UnderBudget => "under budget",
            BudgetStatus::NearLimit => "near limit",
            BudgetStatus::OverBudget => "over budget",
        };
        f.write_str(label)
    }
}

/// Spending for `spent > NEAR_LIMIT_RATIO * budget` counts as near the limit.
pub const NEAR_LIMIT_RATIO: f64 = 0.9;

/// One row of the monthly summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub spent: f64,
    pub budget: Option<f64>,
    pub status: BudgetStatus,
}

pub struct BudgetTracker;

impl BudgetTracker {
    /// Sums the month's spend for one category, matching the category
    /// case-insensitively and the date by calendar year and month.
    pub fn monthly_total(expenses: &[Expense], category: &str, reference: NaiveDateTime) -> f64 {
        expenses
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .filter(|e| {
                e.date.year() == reference.year() && e.date.month() == reference.month()
            })
            .map(|e| e.amount)
            .sum()
    }

    /// Classifies spend against a monthly limit. An absent or zero budget
    /// means there is nothing to check.
    pub fn classify(spent: f64, budget: Option<f64>) -> BudgetStatus {
        let budget = match budget {
            Some(limit) if limit > 0.0 => limit,
            _ => return BudgetStatus::NoBudgetSet,
        };
        if spent > budget {
            BudgetStatus::OverBudget
        } else if spent > NEAR_LIMIT_RATIO * budget {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::UnderBudget
        }
    }

    /// Builds the monthly report across the union of budgeted categories
    /// and categories present on the ledger, sorted by name.
    pub fn monthly_summary(
        expenses: &[Expense],
        budgets: &CategoryBudgets,
        reference: NaiveDateTime,
    ) -> Vec<CategorySpend> {
        let mut categories: Vec<String> = budgets.names().map(str::to_string).collect();
        for expense in expenses {
            if !categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&expense.category))
            {
                categories.push(expense.category.clone());
            }
        }
        categories.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

        categories
            .into_iter()
            .map(|category| {
                let spent = Self::monthly_total(expenses, &category, reference);
                let budget = budgets.limit(&category);
                let status = Self::classify(spent, budget);
                CategorySpend {
                    category,
                    spent,
                    budget,
                    status,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn expense(amount: f64, category: &str, date: NaiveDateTime) -> Expense {
        Expense::new(amount, category, date)
    }

    #[test]
    fn monthly_total_matches_case_insensitively_within_month() {
        let expenses = vec![
            expense(10.0, "Groceries", at(2024, 5, 2)),
            expense(5.0, "groceries", at(2024, 5, 20)),
            expense(7.0, "Groceries", at(2024, 4, 30)),
            expense(3.0, "Rent", at(2024, 5, 10)),
        ];
        let total = BudgetTracker::monthly_total(&expenses, "GROCERIES", at(2024, 5, 15));
        assert_eq!(total, 15.0);
    }

    #[test]
    fn classify_handles_absent_and_zero_budget() {
        assert_eq!(BudgetTracker::classify(50.0, None), BudgetStatus::NoBudgetSet);
        assert_eq!(
            BudgetTracker::classify(50.0, Some(0.0)),
            BudgetStatus::NoBudgetSet
        );
    }

    #[test]
    fn classify_exact_boundaries() {
        // Spending exactly 90% of the limit is still under budget; the
        // near-limit band opens strictly above it.
        assert_eq!(
            BudgetTracker::classify(90.0, Some(100.0)),
            BudgetStatus::UnderBudget
        );
        assert_eq!(
            BudgetTracker::classify(90.01, Some(100.0)),
            BudgetStatus::NearLimit
        );
        // Spending exactly the limit is near, not over.
        assert_eq!(
            BudgetTracker::classify(100.0, Some(100.0)),
            BudgetStatus::NearLimit
        );
        assert_eq!(
            BudgetTracker::classify(100.01, Some(100.0)),
            BudgetStatus::OverBudget
        );
    }

    #[test]
    fn adding_an_expense_can_push_a_category_over_budget() {
        // 28,500 already spent plus a 2,000 expense against a 30,000 limit.
        let spent = 28_500.0 + 2_000.0;
        assert_eq!(
            BudgetTracker::classify(spent, Some(30_000.0)),
            BudgetStatus::OverBudget
        );
    }

    #[test]
    fn monthly_summary_covers_budget_and_ledger_categories() {
        let mut budgets = CategoryBudgets::new();
        budgets.set("Groceries", 100.0);
        budgets.set("Rent", 900.0);
        let expenses = vec![
            expense(95.0, "groceries", at(2024, 5, 3)),
            expense(20.0, "Coffee", at(2024, 5, 4)),
        ];
        let summary = BudgetTracker::monthly_summary(&expenses, &budgets, at(2024, 5, 15));
        let names: Vec<_> = summary.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(names, vec!["Coffee", "Groceries", "Rent"]);

        let coffee = &summary[0];
        assert_eq!(coffee.status, BudgetStatus::NoBudgetSet);
        let groceries = &summary[1];
        assert_eq!(groceries.spent, 95.0);
        assert_eq!(groceries.status, BudgetStatus::NearLimit);
        let rent = &summary[2];
        assert_eq!(rent.spent, 0.0);
        assert_eq!(rent.status, BudgetStatus::UnderBudget);
    }
}
