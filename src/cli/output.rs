use colored::Colorize;
use std::fmt;

/// Print an informational message.
pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

/// Print a success message.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green(), message);
}

/// Print a warning message.
pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

/// Print an error message.
pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

/// Print a section heading.
pub fn section(title: impl fmt::Display) {
    println!("\n{}", title.to_string().bold());
}
