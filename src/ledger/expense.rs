use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// Wire format for expense timestamps: second precision, no timezone.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single discretionary spending event.
///
/// Identity is positional: an expense is addressed by its index in the
/// ledger, and no durable id survives edits or reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
}

impl Expense {
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
        }
    }
}

/// Parses a user-entered date, accepting either the full timestamp format
/// or a bare `YYYY-MM-DD` (midnight assumed).
pub fn parse_user_date(raw: &str) -> Result<NaiveDateTime, ExpenseError> {
    let trimmed = raw.trim();
    if let Ok(full) = NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(full);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ExpenseError::InvalidInput(format!(
                "`{}` is not a valid date (expected `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`)",
                trimmed
            ))
        })
}

mod date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap()
    }

    #[test]
    fn serializes_with_stable_field_names_and_date_format() {
        let expense = Expense::new(42.5, "Groceries", sample_date());
        let json = serde_json::to_string(&expense).expect("serialize");
        assert!(json.contains("\"amount\":42.5"));
        assert!(json.contains("\"category\":\"Groceries\""));
        assert!(json.contains("\"date\":\"2024-03-15 12:30:45\""));
    }

    #[test]
    fn roundtrips_through_json() {
        let expense = Expense::new(9.99, "Coffee", sample_date());
        let json = serde_json::to_string(&expense).expect("serialize");
        let back: Expense = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, expense);
    }

    #[test]
    fn parse_user_date_accepts_both_formats() {
        let full = parse_user_date("2024-03-15 12:30:45").expect("full format");
        assert_eq!(full, sample_date());
        let bare = parse_user_date("2024-03-15").expect("bare date");
        assert_eq!(
            bare,
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parse_user_date_rejects_garbage() {
        assert!(parse_user_date("15/03/2024").is_err());
        assert!(parse_user_date("").is_err());
    }
}
