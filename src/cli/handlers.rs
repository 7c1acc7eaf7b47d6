//! Menu-choice handlers wiring the interactive prompts to the core
//! services. Each handler reports recoverable problems locally and hands
//! control back to the menu loop.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    core::services::{
        deletion, query, Answer, BudgetStatus, BudgetTracker, DeletionPlan, DeletionRequest,
        DiceSimilarity, Granularity, ResolutionFlow, ResolutionStep, Resolved,
    },
    core::Session,
    ledger::{parse_user_date, DateWindow, Expense, DATE_FORMAT},
};

use super::{io, output, CliError};

pub fn add_expense(session: &mut Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let amount = io::prompt_positive_amount(theme, "Amount spent")?;
    let input = prompt_category_name(theme)?;

    let category = match resolve_category(session, theme, &input)? {
        Some(category) => category,
        None => {
            output::info("Expense not recorded: category not accepted.");
            return Ok(());
        }
    };

    let (status, spent) = session.add_expense(amount, &category)?;
    output::success(format!("Recorded {:.2} under `{}`.", amount, category));
    report_budget_standing(session, &category, status, spent);
    Ok(())
}

fn prompt_category_name(theme: &ColorfulTheme) -> Result<String, CliError> {
    loop {
        let raw = io::prompt_text(theme, "Category")?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            output::warning("Category must not be empty.");
        } else {
            return Ok(trimmed.to_string());
        }
    }
}

/// Drives one category resolution exchange. `None` means the user declined
/// both the suggestion and creating a new category.
fn resolve_category(
    session: &mut Session,
    theme: &ColorfulTheme,
    input: &str,
) -> Result<Option<String>, CliError> {
    let known = session.known_categories();
    let (mut flow, mut step) = ResolutionFlow::begin(
        input,
        known.iter().map(String::as_str),
        &DiceSimilarity,
    );
    loop {
        step = match step {
            ResolutionStep::ConfirmSuggestion { suggestion } => {
                let prompt = format!("Did you mean `{}`?", suggestion);
                let yes = io::confirm_action(theme, &prompt, true)?;
                flow.answer(if yes { Answer::Yes } else { Answer::No })
            }
            ResolutionStep::OfferCreate { name } => {
                let prompt = format!("Create new category `{}`?", name);
                let yes = io::confirm_action(theme, &prompt, true)?;
                flow.answer(if yes { Answer::Yes } else { Answer::No })
            }
            ResolutionStep::AskBudget { name } => {
                let prompt = format!("Monthly budget for `{}`", name);
                let limit = io::prompt_positive_amount(theme, &prompt)?;
                flow.answer(Answer::Budget(limit))
            }
            ResolutionStep::Done(Resolved::Accepted {
                category,
                new_budget,
            }) => {
                if let Some(limit) = new_budget {
                    session.register_budget(&category, limit)?;
                    output::success(format!(
                        "Category `{}` created with a {:.2} monthly budget.",
                        category, limit
                    ));
                }
                return Ok(Some(category));
            }
            ResolutionStep::Done(Resolved::Rejected) => return Ok(None),
        };
    }
}

fn report_budget_standing(session: &Session, category: &str, status: BudgetStatus, spent: f64) {
    let limit = session.budgets().limit(category);
    match status {
        BudgetStatus::OverBudget => output::warning(format!(
            "`{}` is over budget: {:.2} spent of {:.2} this month.",
            category,
            spent,
            limit.unwrap_or_default()
        )),
        BudgetStatus::NearLimit => output::warning(format!(
            "`{}` is near its limit: {:.2} spent of {:.2} this month.",
            category,
            spent,
            limit.unwrap_or_default()
        )),
        BudgetStatus::UnderBudget | BudgetStatus::NoBudgetSet => {}
    }
}

pub fn list_expenses(session: &Session) -> Result<(), CliError> {
    print_expense_listing(session.expenses());
    Ok(())
}

fn print_expense_listing(expenses: &[Expense]) {
    if expenses.is_empty() {
        output::info("No expenses recorded.");
        return;
    }
    for (position, expense) in expenses.iter().enumerate() {
        println!(
            "{:>4}. {}  {:<24} {:>10.2}",
            position + 1,
            expense.date.format(DATE_FORMAT),
            expense.category,
            expense.amount
        );
    }
}

pub fn edit_expense(session: &mut Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    if session.expenses().is_empty() {
        output::info("No expenses to edit.");
        return Ok(());
    }
    print_expense_listing(session.expenses());
    let index = match prompt_single_position(theme, session.expenses().len())? {
        Some(index) => index,
        None => {
            output::info("Edit cancelled.");
            return Ok(());
        }
    };
    let current = session.expenses()[index].clone();

    let amount = prompt_amount_with_default(theme, current.amount)?;
    let category_input =
        io::prompt_text_with_default(theme, "Category", current.category.clone())?;
    let category = if category_input.trim().eq_ignore_ascii_case(&current.category) {
        current.category.clone()
    } else {
        match resolve_category(session, theme, category_input.trim())? {
            Some(category) => category,
            None => {
                output::info("Edit cancelled: category not accepted.");
                return Ok(());
            }
        }
    };
    let date = prompt_date_with_default(theme, &current)?;

    session.edit_expense(index, Expense::new(amount, category, date))?;
    output::success(format!("Expense {} updated.", index + 1));
    Ok(())
}

fn prompt_single_position(
    theme: &ColorfulTheme,
    len: usize,
) -> Result<Option<usize>, CliError> {
    loop {
        let raw = io::prompt_text_allow_empty(theme, "Position (empty to cancel)")?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<usize>() {
            Ok(position) if position >= 1 && position <= len => return Ok(Some(position - 1)),
            _ => output::warning(format!("Enter a position between 1 and {}.", len)),
        }
    }
}

fn prompt_amount_with_default(theme: &ColorfulTheme, default: f64) -> Result<f64, CliError> {
    loop {
        let raw = io::prompt_text_with_default(theme, "Amount", format!("{:.2}", default))?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => return Ok(value),
            _ => output::warning("Enter a positive number."),
        }
    }
}

fn prompt_date_with_default(
    theme: &ColorfulTheme,
    current: &Expense,
) -> Result<chrono::NaiveDateTime, CliError> {
    loop {
        let raw = io::prompt_text_with_default(
            theme,
            "Date",
            current.date.format(DATE_FORMAT).to_string(),
        )?;
        match parse_user_date(&raw) {
            Ok(date) => return Ok(date),
            Err(err) => output::warning(err),
        }
    }
}

pub fn delete_expenses(session: &mut Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    if session.expenses().is_empty() {
        output::info("No expenses to delete.");
        return Ok(());
    }
    print_expense_listing(session.expenses());
    loop {
        let raw = io::prompt_text_allow_empty(
            theme,
            "Positions to delete, comma-separated (empty to cancel)",
        )?;
        let positions = match deletion::parse_positions(&raw) {
            Ok(DeletionRequest::Cancelled) => {
                output::info("Deletion cancelled.");
                return Ok(());
            }
            Ok(DeletionRequest::Positions(positions)) => positions,
            Err(err) => {
                output::warning(err);
                continue;
            }
        };
        let plan = match DeletionPlan::new(&positions, session.expenses().len()) {
            Ok(plan) => plan,
            Err(err) => {
                output::warning(err);
                continue;
            }
        };
        let removed = session.delete_expenses(&plan)?;
        output::success(format!("Deleted {} expense(s):", removed.len()));
        for expense in &removed {
            println!(
                "      {}  {:<24} {:>10.2}",
                expense.date.format(DATE_FORMAT),
                expense.category,
                expense.amount
            );
        }
        return Ok(());
    }
}

pub fn monthly_summary(session: &Session) -> Result<(), CliError> {
    let now = Local::now().naive_local();
    let summary = BudgetTracker::monthly_summary(session.expenses(), session.budgets(), now);
    if summary.is_empty() {
        output::info("Nothing to summarize yet.");
        return Ok(());
    }
    output::section(format!("Monthly summary ({})", now.format("%Y-%m")));
    for row in summary {
        let budget = row
            .budget
            .map(|limit| format!("{:>10.2}", limit))
            .unwrap_or_else(|| format!("{:>10}", "-"));
        println!(
            "  {:<24} spent {:>10.2}  budget {}  [{}]",
            row.category, row.spent, budget, row.status
        );
    }
    Ok(())
}

pub fn category_breakdown(session: &Session) -> Result<(), CliError> {
    let breakdown = query::category_breakdown(session.expenses());
    if breakdown.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    output::section("Spending by category (all time)");
    for (category, total) in breakdown {
        println!("  {:<24} {:>10.2}", category, total);
    }
    Ok(())
}

pub fn spending_trend(session: &Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let choice = Select::with_theme(theme)
        .with_prompt("Group by")
        .items(&["Day", "Week", "Month"])
        .default(2)
        .interact()?;
    let granularity = match choice {
        0 => Granularity::Day,
        1 => Granularity::Week,
        _ => Granularity::Month,
    };
    let rows = query::trend(session.expenses(), granularity);
    if rows.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    output::section("Spending trend");
    for (bucket, total) in rows {
        println!("  {:<12} {:>10.2}", bucket, total);
    }
    Ok(())
}

pub fn calendar_view(session: &Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let year = loop {
        let raw = io::prompt_text(theme, "Year")?;
        match raw.trim().parse::<i32>() {
            Ok(year) => break year,
            Err(_) => output::warning("Enter a year, e.g. 2024."),
        }
    };
    let month = loop {
        let raw = io::prompt_text(theme, "Month (1-12)")?;
        match raw.trim().parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => break month,
            _ => output::warning("Enter a month between 1 and 12."),
        }
    };
    let grid = query::calendar_grid(session.expenses(), year, month);
    if grid.day_totals.is_empty() {
        output::info(format!("No expenses in {:04}-{:02}.", year, month));
        return Ok(());
    }
    output::section(format!("Daily spending, {:04}-{:02}", year, month));
    for (day, total) in &grid.day_totals {
        println!("  {:04}-{:02}-{:02}  {:>10.2}", year, month, day, total);
        if let Some(items) = grid.day_items.get(day) {
            for (category, amount) in items {
                println!("      {:<24} {:>10.2}", category, amount);
            }
        }
    }
    Ok(())
}

pub fn filter_by_date(session: &Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let choice = Select::with_theme(theme)
        .with_prompt("Range")
        .items(&["This week", "This month", "Custom range"])
        .default(0)
        .interact()?;
    let today = Local::now().date_naive();
    let window = match choice {
        0 => DateWindow::this_week(today),
        1 => DateWindow::this_month(today),
        _ => loop {
            let start = prompt_date_only(theme, "Start date (YYYY-MM-DD)")?;
            let end = prompt_date_only(theme, "End date (YYYY-MM-DD)")?;
            match DateWindow::new(start, end) {
                Ok(window) => break window,
                Err(err) => output::warning(err),
            }
        },
    };
    let filtered = query::filter_by_window(session.expenses(), &window);
    if filtered.is_empty() {
        output::info(format!(
            "No expenses between {} and {}.",
            window.start, window.end
        ));
        return Ok(());
    }
    output::section(format!("Expenses from {} to {}", window.start, window.end));
    let mut total = 0.0;
    for expense in &filtered {
        total += expense.amount;
        println!(
            "  {}  {:<24} {:>10.2}",
            expense.date.format(DATE_FORMAT),
            expense.category,
            expense.amount
        );
    }
    println!("  {:<46} {:>10.2}", "Total", total);
    Ok(())
}

fn prompt_date_only(theme: &ColorfulTheme, prompt: &str) -> Result<NaiveDate, CliError> {
    loop {
        let raw = io::prompt_text(theme, prompt)?;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => output::warning("Enter a date as YYYY-MM-DD."),
        }
    }
}

pub fn deleted_history(session: &Session) -> Result<(), CliError> {
    let log = session.audit_log()?;
    if log.is_empty() {
        output::info("No deleted expenses on record.");
        return Ok(());
    }
    output::section("Deleted expenses");
    for expense in &log {
        println!(
            "  {}  {:<24} {:>10.2}",
            expense.date.format(DATE_FORMAT),
            expense.category,
            expense.amount
        );
    }
    Ok(())
}

pub fn export_csv(session: &Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let raw = io::prompt_text(theme, "Export file path")?;
    let path = PathBuf::from(raw.trim());
    let count = session.export_csv(&path)?;
    output::success(format!("Exported {} expense(s) to {}.", count, path.display()));
    Ok(())
}

pub fn import_csv(session: &mut Session, theme: &ColorfulTheme) -> Result<(), CliError> {
    let raw = io::prompt_text(theme, "Import file path")?;
    let path = PathBuf::from(raw.trim());
    let count = session.import_csv(&path)?;
    if count == 0 {
        output::info("Nothing to import.");
    } else {
        output::success(format!("Imported {} expense(s).", count));
    }
    Ok(())
}
