use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// An inclusive date range used by the query engine.
///
/// Both `start` and `end` are included; internally the end boundary is
/// pushed one day forward so comparisons stay half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExpenseError> {
        if end < start {
            return Err(ExpenseError::InvalidInput(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The calendar week containing `today`, Sunday through Saturday.
    pub fn this_week(today: NaiveDate) -> Self {
        let back = Days::new(u64::from(today.weekday().num_days_from_sunday()));
        let start = today.checked_sub_days(back).unwrap_or(today);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(today);
        Self { start, end }
    }

    /// The current calendar month, from day 1 through `today`.
    pub fn this_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let end_exclusive = self.end.succ_opt().unwrap_or(NaiveDate::MAX);
        date >= self.start && date < end_exclusive
    }
}
