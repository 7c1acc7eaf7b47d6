use dialoguer::{theme::ColorfulTheme, Select};

use crate::core::Session;

use super::{handlers, output, CliError};

const MENU_ITEMS: [&str; 13] = [
    "Add expense",
    "List expenses",
    "Edit expense",
    "Delete expenses",
    "Filter by date",
    "Monthly summary",
    "Category breakdown",
    "Spending trend",
    "Calendar view",
    "Deleted history",
    "Export CSV",
    "Import CSV",
    "Exit",
];

/// Runs the interactive menu loop until the user exits. Recoverable errors
/// are reported and control returns to the menu; only terminal I/O failures
/// propagate out.
pub fn run(session: &mut Session) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    output::section("Expense Core");
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Menu")
            .items(&MENU_ITEMS)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => handlers::add_expense(session, &theme),
            1 => handlers::list_expenses(session),
            2 => handlers::edit_expense(session, &theme),
            3 => handlers::delete_expenses(session, &theme),
            4 => handlers::filter_by_date(session, &theme),
            5 => handlers::monthly_summary(session),
            6 => handlers::category_breakdown(session),
            7 => handlers::spending_trend(session, &theme),
            8 => handlers::calendar_view(session, &theme),
            9 => handlers::deleted_history(session),
            10 => handlers::export_csv(session, &theme),
            11 => handlers::import_csv(session, &theme),
            _ => break,
        };

        if let Err(err) = result {
            match err {
                CliError::Dialoguer(inner) => return Err(CliError::Dialoguer(inner)),
                recoverable => output::error(recoverable),
            }
        }
    }
    output::info("Goodbye.");
    Ok(())
}
