//! Read-only views and aggregates over the ledger.
//!
//! Everything here hands pre-aggregated totals to an external presentation
//! layer; nothing mutates the ledger or renders output.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::ledger::{DateWindow, Expense};

/// Time bucket used by the spending trend aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    fn label(self, expense: &Expense) -> String {
        let date = expense.date.date();
        match self {
            Granularity::Day => date.format("%Y-%m-%d").to_string(),
            // ISO year-week, e.g. `2024-W21`.
            Granularity::Week => date.format("%G-W%V").to_string(),
            Granularity::Month => date.format("%Y-%m").to_string(),
        }
    }
}

/// Expenses whose date falls inside the window, boundaries included.
pub fn filter_by_window<'a>(expenses: &'a [Expense], window: &DateWindow) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| window.contains(e.date.date()))
        .collect()
}

/// Full-ledger totals per category, grouped case-insensitively under the
/// first-seen casing and sorted by name.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, (String, f64)> = BTreeMap::new();
    for expense in expenses {
        let key = expense.category.to_lowercase();
        let entry = totals
            .entry(key)
            .or_insert_with(|| (expense.category.clone(), 0.0));
        entry.1 += expense.amount;
    }
    totals.into_values().collect()
}

/// Totals per time bucket, ordered by bucket label.
pub fn trend(expenses: &[Expense], granularity: Granularity) -> Vec<(String, f64)> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *buckets.entry(granularity.label(expense)).or_insert(0.0) += expense.amount;
    }
    buckets.into_iter().collect()
}

/// Per-day totals and itemized entries for one calendar month, keyed by
/// day of month. Suited for a calendar-grid presentation with tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub day_totals: BTreeMap<u32, f64>,
    pub day_items: BTreeMap<u32, Vec<(String, f64)>>,
}

pub fn calendar_grid(expenses: &[Expense], year: i32, month: u32) -> CalendarGrid {
    let mut day_totals: BTreeMap<u32, f64> = BTreeMap::new();
    let mut day_items: BTreeMap<u32, Vec<(String, f64)>> = BTreeMap::new();
    for expense in expenses {
        let date = expense.date.date();
        if date.year() != year || date.month() != month {
            continue;
        }
        let day = date.day();
        *day_totals.entry(day).or_insert(0.0) += expense.amount;
        day_items
            .entry(day)
            .or_default()
            .push((expense.category.clone(), expense.amount));
    }
    CalendarGrid {
        year,
        month,
        day_totals,
        day_items,
    }
}
