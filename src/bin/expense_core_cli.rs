use expense_core::{cli, core::Session, storage::JsonStorage};

fn main() {
    expense_core::init();

    let storage = match JsonStorage::new_default() {
        Ok(storage) => storage,
        Err(err) => {
            cli::output::error(format!("Failed to prepare data directory: {}", err));
            std::process::exit(1);
        }
    };
    let mut session = match Session::open(storage) {
        Ok(session) => session,
        Err(err) => {
            cli::output::error(format!("Failed to load ledger: {}", err));
            std::process::exit(1);
        }
    };

    if let Err(err) = cli::shell::run(&mut session) {
        cli::output::error(format!("Shell terminated: {}", err));
        std::process::exit(1);
    }
}
