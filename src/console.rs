//! Operator-facing console messages with colored severity prefixes

use colored::Colorize;

/// Print an informational line to stdout
pub fn log(message: &str) {
    println!("{}", message);
}

/// Print a success line to stdout
pub fn success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print a warning line to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Print an error line to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
