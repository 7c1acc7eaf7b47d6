use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::utils::{audit_file_in, budgets_file_in, ensure_dir, expenses_file_in},
    ledger::{CategoryBudgets, Expense},
};

use super::Result;

/// JSON-file persistence for the three stores: the active expense ledger,
/// the category budget map, and the deleted-expense audit log.
///
/// Every save is a full-file rewrite with no atomic rename or fsync; a
/// crash mid-write can corrupt the store. Last successful save wins.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    expenses_file: PathBuf,
    budgets_file: PathBuf,
    audit_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self {
            expenses_file: expenses_file_in(&root),
            budgets_file: budgets_file_in(&root),
            audit_file: audit_file_in(&root),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(crate::core::utils::app_data_dir())
    }

    /// Loads the active ledger. A missing file is an empty ledger.
    pub fn load_expenses(&self) -> Result<Vec<Expense>> {
        read_or_default(&self.expenses_file)
    }

    /// Rewrites the active ledger in full, preserving record order.
    pub fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        tracing::debug!(count = expenses.len(), "saving expense ledger");
        write_json(&self.expenses_file, &expenses)
    }

    /// Loads the category budget map. A missing file is an empty map.
    pub fn load_budgets(&self) -> Result<CategoryBudgets> {
        read_or_default(&self.budgets_file)
    }

    pub fn save_budgets(&self, budgets: &CategoryBudgets) -> Result<()> {
        tracing::debug!(count = budgets.len(), "saving budget map");
        write_json(&self.budgets_file, budgets)
    }

    /// Loads the deleted-expense audit log. A missing file is an empty log.
    pub fn load_audit_log(&self) -> Result<Vec<Expense>> {
        read_or_default(&self.audit_file)
    }

    /// Appends records to the audit log in caller-supplied order. The log
    /// is read back, extended, and rewritten whole; it is never pruned.
    pub fn append_to_audit_log(&self, records: &[Expense]) -> Result<()> {
        let mut log = self.load_audit_log()?;
        log.extend(records.iter().cloned());
        tracing::debug!(appended = records.len(), total = log.len(), "audit log updated");
        write_json(&self.audit_file, &log)
    }

    pub fn expenses_path(&self) -> &Path {
        &self.expenses_file
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(())
}
