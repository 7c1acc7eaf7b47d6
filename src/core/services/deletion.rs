//! Multi-select deletion with an audit trail.
//!
//! Parsing and planning are pure; the caller owns persistence and the
//! prompt loop. Positions are 1-based display positions from the most
//! recent listing and are validated against the ledger before anything
//! is removed, so a batch either applies fully or not at all.

use std::collections::BTreeSet;

use crate::ledger::Expense;

use super::{ServiceError, ServiceResult};

/// Outcome of parsing the raw position input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionRequest {
    /// Empty input: the user backed out. Not an error.
    Cancelled,
    /// 1-based positions as typed, duplicates preserved.
    Positions(Vec<usize>),
}

/// Parses comma-separated 1-based positions, e.g. `2,5` or ` 1, 3 `.
pub fn parse_positions(input: &str) -> ServiceResult<DeletionRequest> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DeletionRequest::Cancelled);
    }
    let mut positions = Vec::new();
    for token in trimmed.split(',') {
        let token = token.trim();
        let position: usize = token.parse().map_err(|_| {
            ServiceError::Invalid(format!("`{}` is not a valid position", token))
        })?;
        if position == 0 {
            return Err(ServiceError::Invalid("positions start at 1".into()));
        }
        positions.push(position);
    }
    Ok(DeletionRequest::Positions(positions))
}

/// A validated deletion batch holding zero-based indices in descending
/// order, so removals never shift an index that is still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    indices: Vec<usize>,
}

impl DeletionPlan {
    /// Validates every position against the current ledger length and
    /// collapses duplicates. Any invalid position rejects the whole batch.
    pub fn new(positions: &[usize], ledger_len: usize) -> ServiceResult<Self> {
        let invalid: Vec<String> = positions
            .iter()
            .filter(|&&p| p == 0 || p > ledger_len)
            .map(|p| p.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(ServiceError::Invalid(format!(
                "no expense at position {}",
                invalid.join(", ")
            )));
        }
        let unique: BTreeSet<usize> = positions.iter().copied().collect();
        let indices = unique.into_iter().rev().map(|p| p - 1).collect();
        Ok(Self { indices })
    }

    /// Zero-based indices in removal (descending) order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Removes the planned records, returning them in removal order.
    pub fn execute(&self, expenses: &mut Vec<Expense>) -> Vec<Expense> {
        self.indices
            .iter()
            .map(|&index| expenses.remove(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ledger(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2024, 5, 1 + i as u32)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap();
                Expense::new((i + 1) as f64, format!("cat{}", i + 1), date)
            })
            .collect()
    }

    #[test]
    fn empty_input_is_a_cancel() {
        assert_eq!(parse_positions("").unwrap(), DeletionRequest::Cancelled);
        assert_eq!(parse_positions("   ").unwrap(), DeletionRequest::Cancelled);
    }

    #[test]
    fn parse_accepts_spaced_lists_and_rejects_garbage() {
        assert_eq!(
            parse_positions(" 1, 3 ,5").unwrap(),
            DeletionRequest::Positions(vec![1, 3, 5])
        );
        assert!(parse_positions("1,x").is_err());
        assert!(parse_positions("0").is_err());
        assert!(parse_positions("1,,2").is_err());
    }

    #[test]
    fn any_out_of_range_position_rejects_the_whole_batch() {
        let err = DeletionPlan::new(&[1, 6], 5).expect_err("6 is out of range");
        assert!(format!("{err}").contains("6"));
    }

    #[test]
    fn duplicates_collapse_and_removal_is_high_to_low() {
        let plan = DeletionPlan::new(&[2, 2, 5], 5).expect("valid plan");
        assert_eq!(plan.indices(), &[4, 1]);

        let mut expenses = ledger(5);
        let removed = plan.execute(&mut expenses);
        assert_eq!(expenses.len(), 3);
        assert_eq!(removed.len(), 2);
        // Removal order is highest position first.
        assert_eq!(removed[0].category, "cat5");
        assert_eq!(removed[1].category, "cat2");
        let remaining: Vec<_> = expenses.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(remaining, vec!["cat1", "cat3", "cat4"]);
    }

    #[test]
    fn deleting_every_position_empties_the_ledger() {
        let plan = DeletionPlan::new(&[1, 2, 3], 3).expect("valid plan");
        let mut expenses = ledger(3);
        let removed = plan.execute(&mut expenses);
        assert!(expenses.is_empty());
        assert_eq!(removed.len(), 3);
    }
}
