//! CSV import/export for the expense ledger.
//!
//! The contract is a `date,amount,category` header with data rows in that
//! column order. Import accepts categories verbatim; it never runs
//! category resolution or budget provisioning.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::{
    errors::ExpenseError,
    ledger::{Expense, DATE_FORMAT},
};

use super::Result;

pub const CSV_HEADERS: [&str; 3] = ["date", "amount", "category"];

/// Writes the full ledger to `path` in the contract column order.
pub fn export_expenses(path: &Path, expenses: &[Expense]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for expense in expenses {
        writer.write_record([
            expense.date.format(DATE_FORMAT).to_string(),
            expense.amount.to_string(),
            expense.category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads expenses from `path`. An absent file yields an empty list; any
/// malformed row fails the whole load so no partial import is applied.
pub fn import_expenses(path: &Path) -> Result<Vec<Expense>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let names: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if names != CSV_HEADERS {
        return Err(ExpenseError::InvalidInput(format!(
            "unexpected CSV header `{}` (expected `{}`)",
            names.join(","),
            CSV_HEADERS.join(",")
        )));
    }

    let mut expenses = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = row + 2;
        let date_raw = record.get(0).unwrap_or_default().trim();
        let amount_raw = record.get(1).unwrap_or_default().trim();
        let category = record.get(2).unwrap_or_default().trim();

        let date = NaiveDateTime::parse_from_str(date_raw, DATE_FORMAT).map_err(|_| {
            ExpenseError::InvalidInput(format!("line {}: bad date `{}`", line, date_raw))
        })?;
        let amount: f64 = amount_raw.parse().map_err(|_| {
            ExpenseError::InvalidInput(format!("line {}: bad amount `{}`", line, amount_raw))
        })?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(ExpenseError::InvalidInput(format!(
                "line {}: amount `{}` must be a non-negative number",
                line, amount_raw
            )));
        }
        if category.is_empty() {
            return Err(ExpenseError::InvalidInput(format!(
                "line {}: empty category",
                line
            )));
        }
        expenses.push(Expense::new(amount, category, date));
    }
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample() -> Vec<Expense> {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(18, 15, 0)
                .unwrap()
        };
        vec![
            Expense::new(12.5, "Groceries", day(1)),
            Expense::new(7.0, "Coffee", day(3)),
        ]
    }

    #[test]
    fn export_then_import_reproduces_the_ledger() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("out.csv");
        let expenses = sample();
        export_expenses(&path, &expenses).expect("export");
        let imported = import_expenses(&path).expect("import");
        assert_eq!(imported, expenses);
    }

    #[test]
    fn absent_file_imports_as_empty() {
        let temp = TempDir::new().expect("temp dir");
        let imported = import_expenses(&temp.path().join("nope.csv")).expect("import");
        assert!(imported.is_empty());
    }

    #[test]
    fn bad_amount_fails_the_whole_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("bad.csv");
        std::fs::write(
            &path,
            "date,amount,category\n2024-05-01 18:15:00,12.5,Groceries\n2024-05-02 09:00:00,oops,Fuel\n",
        )
        .expect("write");
        assert!(import_expenses(&path).is_err());
    }

    #[test]
    fn negative_or_non_finite_amount_fails_the_whole_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("neg.csv");
        std::fs::write(
            &path,
            "date,amount,category\n2024-05-01 18:15:00,12.5,Groceries\n2024-05-01 09:00:00,-5.0,Refund\n",
        )
        .expect("write");
        assert!(import_expenses(&path).is_err());

        let path = temp.path().join("nan.csv");
        std::fs::write(&path, "date,amount,category\n2024-05-01 09:00:00,NaN,Fuel\n")
            .expect("write");
        assert!(import_expenses(&path).is_err());
    }

    #[test]
    fn wrong_header_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("hdr.csv");
        std::fs::write(&path, "amount,date,category\n").expect("write");
        assert!(import_expenses(&path).is_err());
    }
}
