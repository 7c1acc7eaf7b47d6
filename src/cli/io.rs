use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use super::{output, CliError};

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CliError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for text, accepting an empty line (used where empty means cancel).
pub fn prompt_text_allow_empty(theme: &ColorfulTheme, prompt: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for text with a default shown; Enter keeps the default.
pub fn prompt_text_with_default(
    theme: &ColorfulTheme,
    prompt: &str,
    default: String,
) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for a strictly positive amount, re-asking until satisfied.
pub fn prompt_positive_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CliError> {
    loop {
        let raw = prompt_text(theme, prompt)?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => return Ok(value),
            _ => output::warning("Enter a positive number."),
        }
    }
}
