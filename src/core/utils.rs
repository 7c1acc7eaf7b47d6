use dirs::home_dir;
use std::sync::Once;
use std::{env, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".expense_core";
const EXPENSES_FILE: &str = "expenses.json";
const BUDGETS_FILE: &str = "budgets.json";
const AUDIT_FILE: &str = "deleted_expenses.json";

/// Returns the application-specific data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the active expense ledger inside a data directory.
pub fn expenses_file_in(root: &Path) -> PathBuf {
    root.join(EXPENSES_FILE)
}

/// Path of the category budget map inside a data directory.
pub fn budgets_file_in(root: &Path) -> PathBuf {
    root.join(BUDGETS_FILE)
}

/// Path of the deleted-expense audit log inside a data directory.
pub fn audit_file_in(root: &Path) -> PathBuf {
    root.join(AUDIT_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
